//! Fixed period and break windows for the school day
//!
//! Both tables are hardcoded: eight 50-minute periods with seven gaps between
//! them (six short breaks and a one-hour lunch). All boundaries are expressed
//! in minutes from midnight and compared half-open, `[start, end)`, so every
//! minute of the day belongs to at most one window.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of periods in a school day.
pub const PERIOD_COUNT: u8 = 8;

/// One fixed classroom time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    /// Period number, 1 through 8.
    pub period: u8,
    /// Start of the slot in minutes from midnight (inclusive).
    pub start_minute: u16,
    /// End of the slot in minutes from midnight (exclusive).
    pub end_minute: u16,
}

impl PeriodWindow {
    /// Whether the given minute of day falls inside this window.
    pub fn contains(&self, minute: u16) -> bool {
        self.start_minute <= minute && minute < self.end_minute
    }

    /// Display form of the window, e.g. `"08:10-09:00"`.
    pub fn time_range(&self) -> String {
        format!("{}-{}", fmt_minute(self.start_minute), fmt_minute(self.end_minute))
    }
}

/// The eight fixed period windows of a school day.
pub const PERIOD_WINDOWS: [PeriodWindow; 8] = [
    PeriodWindow { period: 1, start_minute: 490, end_minute: 540 }, // 08:10-09:00
    PeriodWindow { period: 2, start_minute: 550, end_minute: 600 }, // 09:10-10:00
    PeriodWindow { period: 3, start_minute: 610, end_minute: 660 }, // 10:10-11:00
    PeriodWindow { period: 4, start_minute: 670, end_minute: 720 }, // 11:10-12:00
    PeriodWindow { period: 5, start_minute: 780, end_minute: 830 }, // 13:00-13:50
    PeriodWindow { period: 6, start_minute: 840, end_minute: 890 }, // 14:00-14:50
    PeriodWindow { period: 7, start_minute: 905, end_minute: 955 }, // 15:05-15:55
    PeriodWindow { period: 8, start_minute: 965, end_minute: 1015 }, // 16:05-16:55
];

/// Kind of inter-period gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakKind {
    /// Short gap between adjacent periods.
    Short,
    /// The midday lunch break.
    Lunch,
}

impl BreakKind {
    /// Display label for this kind of break.
    pub fn label(&self) -> &'static str {
        match self {
            BreakKind::Short => "short break",
            BreakKind::Lunch => "lunch break",
        }
    }
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fixed inter-period gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakWindow {
    /// Start of the gap in minutes from midnight (inclusive).
    pub start_minute: u16,
    /// End of the gap in minutes from midnight (exclusive).
    pub end_minute: u16,
    /// Short break or lunch.
    pub kind: BreakKind,
    /// The period that starts when this gap ends.
    pub following_period: u8,
}

impl BreakWindow {
    /// Whether the given minute of day falls inside this gap.
    pub fn contains(&self, minute: u16) -> bool {
        self.start_minute <= minute && minute < self.end_minute
    }

    /// Display form of the gap, e.g. `"12:00-13:00"`.
    pub fn time_range(&self) -> String {
        format!("{}-{}", fmt_minute(self.start_minute), fmt_minute(self.end_minute))
    }
}

/// The seven fixed gaps of a school day, one after each of periods 1-7.
pub const BREAK_WINDOWS: [BreakWindow; 7] = [
    BreakWindow { start_minute: 540, end_minute: 550, kind: BreakKind::Short, following_period: 2 },
    BreakWindow { start_minute: 600, end_minute: 610, kind: BreakKind::Short, following_period: 3 },
    BreakWindow { start_minute: 660, end_minute: 670, kind: BreakKind::Short, following_period: 4 },
    BreakWindow { start_minute: 720, end_minute: 780, kind: BreakKind::Lunch, following_period: 5 },
    BreakWindow { start_minute: 830, end_minute: 840, kind: BreakKind::Short, following_period: 6 },
    BreakWindow { start_minute: 890, end_minute: 905, kind: BreakKind::Short, following_period: 7 },
    BreakWindow { start_minute: 955, end_minute: 965, kind: BreakKind::Short, following_period: 8 },
];

/// Look up the fixed window for a period number.
pub fn period_window(period: u8) -> Option<&'static PeriodWindow> {
    PERIOD_WINDOWS.iter().find(|w| w.period == period)
}

/// Look up the gap that follows a period, if any.
///
/// Period 8 ends the school day and has no trailing gap.
pub fn break_after(period: u8) -> Option<&'static BreakWindow> {
    BREAK_WINDOWS.iter().find(|b| b.following_period == period + 1)
}

/// Format a minute-of-day value as `"HH:MM"`.
fn fmt_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn period_boundaries_match_bell_schedule() {
        assert_eq!(PERIOD_WINDOWS[0].time_range(), "08:10-09:00");
        assert_eq!(PERIOD_WINDOWS[4].time_range(), "13:00-13:50");
        assert_eq!(PERIOD_WINDOWS[7].time_range(), "16:05-16:55");
    }

    #[test]
    fn lunch_is_the_fourth_gap() {
        let lunch = &BREAK_WINDOWS[3];
        assert_eq!(lunch.kind, BreakKind::Lunch);
        assert_eq!(lunch.time_range(), "12:00-13:00");
        assert_eq!(lunch.following_period, 5);
    }

    #[test]
    fn every_break_leads_into_its_following_period() {
        for gap in &BREAK_WINDOWS {
            let next = period_window(gap.following_period).expect("following period exists");
            assert_eq!(gap.end_minute, next.start_minute);
        }
    }

    #[test]
    fn break_after_covers_periods_one_through_seven() {
        for period in 1..PERIOD_COUNT {
            assert!(break_after(period).is_some(), "period {period} should have a gap");
        }
        assert!(break_after(PERIOD_COUNT).is_none());
    }

    proptest! {
        #[test]
        fn windows_are_pairwise_disjoint(minute in 0u16..1440) {
            let in_periods = PERIOD_WINDOWS.iter().filter(|w| w.contains(minute)).count();
            let in_breaks = BREAK_WINDOWS.iter().filter(|b| b.contains(minute)).count();
            // Half-open boundaries: a minute is in at most one window overall.
            prop_assert!(in_periods + in_breaks <= 1);
        }

        #[test]
        fn half_open_boundaries_exclude_window_end(idx in 0usize..8) {
            let window = &PERIOD_WINDOWS[idx];
            prop_assert!(window.contains(window.start_minute));
            prop_assert!(!window.contains(window.end_minute));
        }
    }
}
