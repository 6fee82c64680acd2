//! Live provider polling a wall clock

use std::sync::Arc;

use tokio::time::{Duration, Interval, MissedTickBehavior, interval};
use tracing::trace;

use crate::clock::Clock;
use crate::provider::MomentProvider;
use crate::resolver;
use crate::types::{MomentPacket, ScheduleEntry};
use crate::Result;

/// Default polling rate for live boards.
///
/// One resolution per second is enough for a ticking clock display; slower
/// subscription cadences are carved out downstream by throttling.
pub const DEFAULT_TICK_RATE: f64 = 1.0;

/// Live provider that resolves moments against an injected clock.
///
/// Never ends on its own; the driver's cancellation token is the only way a
/// live feed stops.
pub struct LiveProvider<C: Clock> {
    clock: C,
    entries: Arc<Vec<ScheduleEntry>>,
    interval: Interval,
    tick_rate: f64,
    tick: u64,
}

impl<C: Clock + 'static> LiveProvider<C> {
    /// Create a live provider at the default 1Hz rate.
    pub fn new(clock: C, entries: Arc<Vec<ScheduleEntry>>) -> Self {
        Self::with_tick_rate(clock, entries, DEFAULT_TICK_RATE)
    }

    /// Create a live provider at a custom polling rate.
    ///
    /// The rate is clamped to 0.1..=60Hz; outside that range the poll loop is
    /// either uselessly hot or too coarse for a clock display.
    pub fn with_tick_rate(clock: C, entries: Arc<Vec<ScheduleEntry>>, tick_rate: f64) -> Self {
        let tick_rate = tick_rate.clamp(0.1, 60.0);
        let mut interval = interval(Duration::from_secs_f64(1.0 / tick_rate));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { clock, entries, interval, tick_rate, tick: 0 }
    }
}

#[async_trait::async_trait]
impl<C: Clock + 'static> MomentProvider for LiveProvider<C> {
    async fn next_moment(&mut self) -> Result<Option<MomentPacket>> {
        self.interval.tick().await;

        let now = self.clock.now();
        let moment = resolver::resolve_current_moment(&self.entries, now);
        self.tick += 1;

        trace!("Live moment {}: {:?} at {}", self.tick, moment.kind(), now);

        Ok(Some(MomentPacket::new(moment, self.tick)))
    }

    fn tick_rate(&self) -> f64 {
        self.tick_rate
    }
}
