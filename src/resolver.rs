//! Pure time-to-schedule-slot resolution.
//!
//! Every function here is deterministic given a timestamp and the static
//! tables, and none of them can fail: data absence (weekends, gaps, periods
//! with no class scheduled) is always `None`, never an error. Callers poll
//! these functions on whatever cadence suits their display; there is no state
//! to invalidate between calls.
//!
//! ## Boundary convention
//!
//! All window comparisons are half-open, `[start, end)`, for periods and
//! breaks alike. The original behavior this crate reproduces used an inclusive
//! period end, which made the first minute of each gap (e.g. 09:00) resolve as
//! both "period 1" and "break" depending on which lookup ran. That off-by-one
//! is deliberately not preserved: at 09:00 the period is over and the break
//! has begun.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::types::{
    AgendaSlot, BREAK_WINDOWS, BreakState, DailyAgenda, PERIOD_COUNT, PERIOD_WINDOWS,
    ResolvedMoment, ScheduleEntry, Weekday, break_after, period_window,
};

/// Minute-of-day for a timestamp, ignoring seconds.
///
/// The bell schedule has whole-minute resolution, so seconds never influence
/// classification.
pub(crate) fn minute_of_day(now: NaiveDateTime) -> u16 {
    (now.hour() * 60 + now.minute()) as u16
}

/// Map a timestamp to its school weekday.
///
/// Saturday and Sunday map to `None`; no entries exist for those days.
pub fn school_weekday(now: NaiveDateTime) -> Option<Weekday> {
    Weekday::from_calendar(now.weekday())
}

/// The period whose window contains the given minute of day, if any.
pub fn active_period(minute: u16) -> Option<u8> {
    PERIOD_WINDOWS.iter().find(|w| w.contains(minute)).map(|w| w.period)
}

/// The break containing the given minute of day, if any.
pub fn resolve_break(minute: u16) -> Option<BreakState> {
    BREAK_WINDOWS
        .iter()
        .find(|b| b.contains(minute))
        .map(|b| BreakState { kind: b.kind, next_period: b.following_period })
}

/// The entry scheduled for the timestamp's `(weekday, period)`, if any.
///
/// `None` on weekends, outside every period window, or when the period is
/// active but nothing is scheduled in it.
pub fn find_active_entry(entries: &[ScheduleEntry], now: NaiveDateTime) -> Option<&ScheduleEntry> {
    let weekday = school_weekday(now)?;
    let period = active_period(minute_of_day(now))?;
    entries.iter().find(|e| e.weekday == weekday && e.period == period)
}

/// During a break, the entry scheduled for the following period.
///
/// `None` outside breaks, on weekends, or when the following period has no
/// class scheduled.
pub fn find_next_entry(entries: &[ScheduleEntry], now: NaiveDateTime) -> Option<&ScheduleEntry> {
    let weekday = school_weekday(now)?;
    let break_state = resolve_break(minute_of_day(now))?;
    entries.iter().find(|e| e.weekday == weekday && e.period == break_state.next_period)
}

/// Resolve the full classification of an instant.
///
/// This is the single lookup the moment pipeline runs on every poll; the
/// individual functions above remain available for callers that need only one
/// facet.
pub fn resolve_current_moment(entries: &[ScheduleEntry], now: NaiveDateTime) -> ResolvedMoment {
    let weekday = school_weekday(now);
    let minute = minute_of_day(now);

    let (active_period, active_entry, break_state, next_entry) = match weekday {
        None => (None, None, None, None),
        Some(day) => {
            let period = active_period(minute);
            let entry = period
                .and_then(|p| entries.iter().find(|e| e.weekday == day && e.period == p))
                .cloned();
            let break_state = resolve_break(minute);
            let next = break_state
                .and_then(|b| {
                    entries.iter().find(|e| e.weekday == day && e.period == b.next_period)
                })
                .cloned();
            (period, entry, break_state, next)
        }
    };

    ResolvedMoment { timestamp: now, weekday, active_period, active_entry, break_state, next_entry }
}

/// Build the ordered full-day agenda for one weekday.
///
/// Emits exactly eight period slots in ascending order (`Class` where an
/// entry exists, `Free` otherwise) interleaved with the seven fixed break
/// rows after periods 1 through 7. The shape is invariant; sparse datasets
/// just produce more `Free` rows.
pub fn build_daily_agenda(entries: &[ScheduleEntry], weekday: Weekday) -> DailyAgenda {
    let mut slots = Vec::with_capacity(15);

    for period in 1..=PERIOD_COUNT {
        match entries.iter().find(|e| e.weekday == weekday && e.period == period) {
            Some(entry) => slots.push(AgendaSlot::Class(entry.clone())),
            None => {
                // Window lookup cannot miss for 1..=8, but stay total anyway.
                let time_range =
                    period_window(period).map(|w| w.time_range()).unwrap_or_default();
                slots.push(AgendaSlot::Free { period, time_range });
            }
        }

        if let Some(gap) = break_after(period) {
            slots.push(AgendaSlot::Break { kind: gap.kind, time_range: gap.time_range() });
        }
    }

    DailyAgenda { weekday, slots }
}

/// The next class today starting within the lead window, with minutes to go.
///
/// Returns `Some((minutes_until, entry))` when an entry's period starts in
/// `(now, now + lead]`, whole-minute granularity. The class currently starting
/// (zero minutes out) is excluded; that is [`class_just_started`] territory.
pub fn class_starting_soon(
    entries: &[ScheduleEntry],
    now: NaiveDateTime,
    lead_minutes: u16,
) -> Option<(u16, &ScheduleEntry)> {
    let weekday = school_weekday(now)?;
    let minute = minute_of_day(now);

    PERIOD_WINDOWS
        .iter()
        .filter(|w| w.start_minute > minute && w.start_minute - minute <= lead_minutes)
        .find_map(|w| {
            entries
                .iter()
                .find(|e| e.weekday == weekday && e.period == w.period)
                .map(|e| (w.start_minute - minute, e))
        })
}

/// The active class whose window started within the last `grace` minutes.
pub fn class_just_started(
    entries: &[ScheduleEntry],
    now: NaiveDateTime,
    grace_minutes: u16,
) -> Option<&ScheduleEntry> {
    let entry = find_active_entry(entries, now)?;
    let window = period_window(entry.period)?;
    let minute = minute_of_day(now);
    (minute - window.start_minute <= grace_minutes).then_some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use crate::types::{BreakKind, MomentKind};

    // 2026-08-03 is a Monday; the week runs through Sunday 2026-08-09.
    fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn week_entries() -> Vec<ScheduleEntry> {
        vec![
            ScheduleEntry::new(Weekday::Mon, 1, "08:10-09:00", "Math"),
            ScheduleEntry::new(Weekday::Mon, 5, "13:00-13:50", "History"),
            ScheduleEntry::new(Weekday::Tue, 2, "09:10-10:00", "Physics"),
        ]
    }

    #[test]
    fn weekends_resolve_to_empty_weekday_and_no_period() {
        for day in [8, 9] {
            let moment = resolve_current_moment(&week_entries(), ts(day, 8, 30));
            assert_eq!(moment.weekday, None);
            assert_eq!(moment.active_period, None);
            assert_eq!(moment.kind(), MomentKind::NoSchoolDay);
        }
    }

    #[test]
    fn monday_0810_is_period_one() {
        assert_eq!(active_period(minute_of_day(ts(3, 8, 10))), Some(1));
        let entries = week_entries();
        let entry = find_active_entry(&entries, ts(3, 8, 30)).unwrap();
        assert_eq!(entry.subject, "Math");
    }

    #[test]
    fn monday_0905_is_the_first_break() {
        let now = ts(3, 9, 5);
        assert_eq!(active_period(minute_of_day(now)), None);
        let state = resolve_break(minute_of_day(now)).unwrap();
        assert_eq!(state.kind, BreakKind::Short);
        assert_eq!(state.next_period, 2);
    }

    #[test]
    fn period_end_minute_already_belongs_to_the_break() {
        // Half-open windows: 09:00 is no longer period 1.
        let now = ts(3, 9, 0);
        assert_eq!(active_period(minute_of_day(now)), None);
        assert!(resolve_break(minute_of_day(now)).is_some());
    }

    #[test]
    fn midday_1230_is_lunch_before_period_five() {
        let state = resolve_break(minute_of_day(ts(3, 12, 30))).unwrap();
        assert_eq!(state.kind, BreakKind::Lunch);
        assert_eq!(state.next_period, 5);
    }

    #[test]
    fn next_entry_only_resolves_during_breaks() {
        let entries = week_entries();

        // 12:30 lunch on Monday: next period 5 has History scheduled.
        let next = find_next_entry(&entries, ts(3, 12, 30)).unwrap();
        assert_eq!(next.subject, "History");

        // Mid-period and weekend lookups find nothing.
        assert!(find_next_entry(&entries, ts(3, 8, 30)).is_none());
        assert!(find_next_entry(&entries, ts(8, 12, 30)).is_none());

        // Break whose following period is empty.
        assert!(find_next_entry(&entries, ts(3, 9, 5)).is_none());
    }

    #[test]
    fn active_period_without_entry_finds_no_class() {
        // Monday 09:30 resolves to period 2, but nothing is scheduled there.
        let now = ts(3, 9, 30);
        assert_eq!(active_period(minute_of_day(now)), Some(2));
        assert!(find_active_entry(&week_entries(), now).is_none());

        let moment = resolve_current_moment(&week_entries(), now);
        assert_eq!(moment.active_period, Some(2));
        assert_eq!(moment.active_entry, None);
        assert_eq!(moment.kind(), MomentKind::IdleGap);
    }

    #[test]
    fn empty_dataset_resolves_without_error() {
        let moment = resolve_current_moment(&[], ts(3, 8, 30));
        assert_eq!(moment.weekday, Some(Weekday::Mon));
        assert_eq!(moment.active_period, Some(1));
        assert_eq!(moment.active_entry, None);
    }

    #[test]
    fn agenda_shape_is_invariant() {
        for (entries, classes) in
            [(week_entries(), 2), (vec![], 0), (week_entries()[..1].to_vec(), 1)]
        {
            let agenda = build_daily_agenda(&entries, Weekday::Mon);
            assert_eq!(agenda.slots.len(), 15);
            assert_eq!(agenda.slots.iter().filter(|s| s.is_break()).count(), 7);
            assert_eq!(agenda.class_count(), classes);
        }
    }

    #[test]
    fn agenda_periods_ascend_and_breaks_interleave() {
        let agenda = build_daily_agenda(&week_entries(), Weekday::Mon);

        let periods: Vec<u8> = agenda.slots.iter().filter_map(|s| s.period()).collect();
        assert_eq!(periods, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        // Break rows sit at every odd index; the final slot is period 8.
        for (idx, slot) in agenda.slots.iter().enumerate() {
            assert_eq!(slot.is_break(), idx % 2 == 1, "slot {idx}");
        }
        assert_eq!(agenda.slots.last().unwrap().period(), Some(8));
    }

    #[test]
    fn starting_soon_sees_only_the_lead_window() {
        let entries = week_entries();

        // 07:40 Monday: period 1 starts in 30 minutes, outside a 5-minute lead.
        assert!(class_starting_soon(&entries, ts(3, 7, 40), 5).is_none());

        // 08:06: four minutes out.
        let (minutes, entry) = class_starting_soon(&entries, ts(3, 8, 6), 5).unwrap();
        assert_eq!(minutes, 4);
        assert_eq!(entry.subject, "Math");

        // 08:10 exactly: the class is starting, not "starting soon".
        assert!(class_starting_soon(&entries, ts(3, 8, 10), 5).is_none());
    }

    #[test]
    fn just_started_honors_the_grace_window() {
        let entries = week_entries();

        assert_eq!(class_just_started(&entries, ts(3, 8, 10), 1).unwrap().subject, "Math");
        assert_eq!(class_just_started(&entries, ts(3, 8, 11), 1).unwrap().subject, "Math");
        assert!(class_just_started(&entries, ts(3, 8, 12), 1).is_none());

        // No entry scheduled: nothing started.
        assert!(class_just_started(&entries, ts(3, 9, 10), 1).is_none());
    }

    proptest! {
        #[test]
        fn classification_is_total_and_single(
            day in 3u32..=9,
            hour in 0u32..24,
            minute in 0u32..60
        ) {
            let entries = week_entries();
            let moment = resolve_current_moment(&entries, ts(day, hour, minute));

            // kind() always yields exactly one classification, and the parts
            // that feed it stay mutually consistent.
            match moment.kind() {
                MomentKind::NoSchoolDay => {
                    prop_assert!(moment.weekday.is_none());
                    prop_assert!(moment.active_period.is_none());
                }
                MomentKind::InClass => {
                    prop_assert!(moment.active_entry.is_some());
                    prop_assert!(moment.break_state.is_none());
                }
                MomentKind::InBreak => {
                    prop_assert!(moment.active_period.is_none());
                    prop_assert!(moment.break_state.is_some());
                }
                MomentKind::IdleGap => {
                    prop_assert!(moment.weekday.is_some());
                    prop_assert!(moment.active_entry.is_none());
                }
            }
        }

        #[test]
        fn period_and_break_never_overlap(minute in 0u16..1440) {
            prop_assert!(!(active_period(minute).is_some() && resolve_break(minute).is_some()));
        }

        #[test]
        fn agenda_always_has_eight_periods_and_seven_breaks(
            subset in prop::collection::vec((1u8..=8, "[A-Za-z]{1,12}"), 0..8)
        ) {
            let mut seen = std::collections::HashSet::new();
            let entries: Vec<ScheduleEntry> = subset
                .into_iter()
                .filter(|(period, _)| seen.insert(*period))
                .map(|(period, subject)| {
                    ScheduleEntry::new(Weekday::Wed, period, "00:00-00:00", subject)
                })
                .collect();

            let agenda = build_daily_agenda(&entries, Weekday::Wed);
            let period_slots = agenda.slots.iter().filter(|s| !s.is_break()).count();
            let break_slots = agenda.slots.iter().filter(|s| s.is_break()).count();
            prop_assert_eq!(period_slots, 8);
            prop_assert_eq!(break_slots, 7);
            prop_assert_eq!(agenda.class_count(), entries.len());
        }
    }
}
