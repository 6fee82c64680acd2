//! Refresh rate control for moment streams

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Refresh rate for moment subscriptions.
///
/// Cadence is a presentation concern, not a correctness one: the resolver is
/// idempotent and stateless, so any rate yields consistent classifications.
/// The named variants match the two cadences a schedule view actually wants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RefreshRate {
    /// Full speed from the provider (1Hz for a live board).
    Native,

    /// Once per second, for a ticking clock display.
    Clock,

    /// Every ten seconds, for schedule re-resolution.
    Schedule,

    /// Custom cadence.
    Every(Duration),
}

impl RefreshRate {
    /// The requested emission interval, or `None` for provider-native pacing.
    pub fn interval(self) -> Option<Duration> {
        match self {
            RefreshRate::Native => None,
            RefreshRate::Clock => Some(Duration::from_secs(1)),
            RefreshRate::Schedule => Some(Duration::from_secs(10)),
            RefreshRate::Every(duration) => Some(duration),
        }
    }

    /// Normalize against the provider frequency.
    ///
    /// A request at or above the source rate collapses to `Native`; throttling
    /// to a faster-than-source cadence would only duplicate moments.
    pub fn normalize(self, source_hz: f64) -> Self {
        match self.interval() {
            None => RefreshRate::Native,
            Some(duration) if duration.as_secs_f64() <= 1.0 / source_hz => RefreshRate::Native,
            Some(_) => self,
        }
    }

    /// Throttle interval to apply, if any, given the provider frequency.
    pub fn throttle_interval(self, source_hz: f64) -> Option<Duration> {
        self.normalize(source_hz).interval()
    }
}
