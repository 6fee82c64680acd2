//! Full-day agenda types
//!
//! An agenda is the ordered display sequence for one school day: eight period
//! slots interleaved with the seven fixed gaps. Slots are an explicit tagged
//! enum; break rows are display-only placeholders and are not addressable by
//! period number.

use serde::{Deserialize, Serialize};

use super::{BreakKind, ScheduleEntry, Weekday};

/// One display row in a full-day agenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgendaSlot {
    /// A scheduled class.
    Class(ScheduleEntry),

    /// A period with no class scheduled.
    Free {
        /// Period number, 1 through 8.
        period: u8,
        /// Display time range from the fixed period table.
        time_range: String,
    },

    /// An inter-period gap.
    Break {
        /// Short break or lunch.
        kind: BreakKind,
        /// Display time range from the fixed break table.
        time_range: String,
    },
}

impl AgendaSlot {
    /// Whether this slot is a break row.
    pub fn is_break(&self) -> bool {
        matches!(self, AgendaSlot::Break { .. })
    }

    /// Period number for class and free slots; `None` for breaks.
    pub fn period(&self) -> Option<u8> {
        match self {
            AgendaSlot::Class(entry) => Some(entry.period),
            AgendaSlot::Free { period, .. } => Some(*period),
            AgendaSlot::Break { .. } => None,
        }
    }

    /// Display time range of this slot.
    pub fn time_range(&self) -> &str {
        match self {
            AgendaSlot::Class(entry) => &entry.time_range,
            AgendaSlot::Free { time_range, .. } => time_range,
            AgendaSlot::Break { time_range, .. } => time_range,
        }
    }
}

/// The full agenda for one school day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAgenda {
    /// The day this agenda covers.
    pub weekday: Weekday,

    /// Eight period slots interleaved with seven break rows, in day order.
    pub slots: Vec<AgendaSlot>,
}

impl DailyAgenda {
    /// Number of slots that are scheduled classes.
    pub fn class_count(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, AgendaSlot::Class(_))).count()
    }
}
