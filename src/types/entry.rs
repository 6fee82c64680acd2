//! Schedule entries and school weekdays

use serde::{Deserialize, Serialize};
use std::fmt;

/// A school weekday.
///
/// Saturday and Sunday have no timetable representation; resolving a weekend
/// timestamp yields `None` wherever a `Weekday` is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    /// All school weekdays in order.
    pub const ALL: [Weekday; 5] =
        [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

    /// Map a calendar weekday to a school weekday.
    ///
    /// Returns `None` for Saturday and Sunday.
    pub fn from_calendar(day: chrono::Weekday) -> Option<Self> {
        match day {
            chrono::Weekday::Mon => Some(Weekday::Mon),
            chrono::Weekday::Tue => Some(Weekday::Tue),
            chrono::Weekday::Wed => Some(Weekday::Wed),
            chrono::Weekday::Thu => Some(Weekday::Thu),
            chrono::Weekday::Fri => Some(Weekday::Fri),
            chrono::Weekday::Sat | chrono::Weekday::Sun => None,
        }
    }

    /// Full display name, e.g. `"Monday"`.
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One class in the weekly timetable.
///
/// Entries are immutable once loaded. The dataset holds at most one entry per
/// `(weekday, period)` pair; [`validate_entries`](crate::dataset::validate_entries)
/// enforces this at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// School day this class falls on.
    pub weekday: Weekday,

    /// Period number, 1 through 8.
    pub period: u8,

    /// Display time range in `"HH:MM-HH:MM"` form.
    ///
    /// Presentation only; the authoritative boundaries come from the fixed
    /// [`PeriodWindow`](crate::types::PeriodWindow) table.
    #[serde(rename = "timeRange")]
    pub time_range: String,

    /// Subject taught in this slot.
    pub subject: String,
}

impl ScheduleEntry {
    /// Create a new entry.
    pub fn new(
        weekday: Weekday,
        period: u8,
        time_range: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self { weekday, period, time_range: time_range.into(), subject: subject.into() }
    }
}
