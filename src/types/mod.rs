//! Core types for timetable data representation.
//!
//! This module provides the foundational data structures for schedule
//! resolution:
//!
//! - [`ScheduleEntry`] and [`Weekday`] describe the static weekly dataset
//! - [`PeriodWindow`] and [`BreakWindow`] are the fixed bell-schedule tables
//! - [`ResolvedMoment`] is the derived classification of a single instant,
//!   and [`MomentPacket`] carries one through the provider/driver pipeline
//! - [`AgendaSlot`] and [`DailyAgenda`] model the full-day display sequence
//! - [`ColorTag`] assigns stable display colors to subjects
//! - [`RefreshRate`] controls subscription cadence
//!
//! Everything here is plain data: no I/O, no clocks, no channels. The dataset
//! is read-only at runtime, and every derived value is recomputed from a
//! timestamp on demand.

mod agenda;
mod color;
mod entry;
mod moment;
mod refresh_rate;
mod timetable;

pub use agenda::{AgendaSlot, DailyAgenda};
pub use color::{ColorTag, PALETTE, subject_color_tag};
pub use entry::{ScheduleEntry, Weekday};
pub use moment::{BreakState, MomentKind, MomentPacket, ResolvedMoment};
pub use refresh_rate::RefreshRate;
pub use timetable::{
    BREAK_WINDOWS, BreakKind, BreakWindow, PERIOD_COUNT, PERIOD_WINDOWS, PeriodWindow,
    break_after, period_window,
};
