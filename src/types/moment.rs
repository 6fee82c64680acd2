//! Resolved moment types for the stream-based architecture

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{BreakKind, ScheduleEntry, Weekday};

/// In-break state: which kind of gap, and the period that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakState {
    /// Short break or lunch.
    pub kind: BreakKind,
    /// Period that starts when the gap ends.
    pub next_period: u8,
}

/// Classification of a moment. Exactly one applies at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentKind {
    /// Saturday or Sunday; no timetable exists.
    NoSchoolDay,
    /// Inside a period window with a matching entry.
    InClass,
    /// Inside one of the seven fixed gaps.
    InBreak,
    /// A school day, but outside every period and gap (before school, after
    /// school, or inside a period window with no entry scheduled).
    IdleGap,
}

/// The resolved classification of a single wall-clock instant.
///
/// This is the fundamental data unit that flows through the system. It is
/// derived, recomputed on every poll and never persisted; all fields follow
/// purely from the timestamp, the fixed window tables and the loaded entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMoment {
    /// The instant this moment was resolved for.
    pub timestamp: NaiveDateTime,

    /// School weekday, `None` on weekends.
    pub weekday: Option<Weekday>,

    /// Period whose window contains the timestamp, if any.
    pub active_period: Option<u8>,

    /// Entry scheduled for `(weekday, active_period)`, if any.
    pub active_entry: Option<ScheduleEntry>,

    /// Break window containing the timestamp, if any.
    pub break_state: Option<BreakState>,

    /// During a break, the entry scheduled for the following period.
    pub next_entry: Option<ScheduleEntry>,
}

impl ResolvedMoment {
    /// Classify this moment. Exactly one [`MomentKind`] applies.
    pub fn kind(&self) -> MomentKind {
        if self.weekday.is_none() {
            MomentKind::NoSchoolDay
        } else if self.active_entry.is_some() {
            MomentKind::InClass
        } else if self.break_state.is_some() {
            MomentKind::InBreak
        } else {
            MomentKind::IdleGap
        }
    }

    /// Whether the timestamp falls inside one of the fixed gaps.
    pub fn in_break(&self) -> bool {
        self.break_state.is_some()
    }
}

/// A resolved moment plus its position in the provider's sequence.
///
/// Packets are what [`MomentProvider`](crate::provider::MomentProvider)
/// implementations yield; the tick counter is monotonic per provider and lets
/// consumers detect skipped polls.
#[derive(Debug, Clone)]
pub struct MomentPacket {
    /// The resolved moment.
    pub moment: ResolvedMoment,

    /// Monotonic poll counter.
    pub tick: u64,
}

impl MomentPacket {
    /// Create a new packet.
    pub fn new(moment: ResolvedMoment, tick: u64) -> Self {
        Self { moment, tick }
    }
}
