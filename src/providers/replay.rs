//! Replay provider stepping through scripted timestamps

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::time::{Duration, Interval, MissedTickBehavior, interval};
use tracing::{debug, trace};

use crate::provider::MomentProvider;
use crate::resolver;
use crate::types::{MomentPacket, ScheduleEntry};
use crate::Result;

/// Default pacing for replays, in moments per second.
///
/// Fast enough that a full scripted day finishes quickly in tests, slow
/// enough that subscribers with real work keep up.
pub const DEFAULT_REPLAY_RATE: f64 = 20.0;

/// Replay provider that resolves a scripted timestamp sequence.
///
/// Behaves like a live feed (same packets, same pacing contract) but ends
/// when the script runs out, which makes it the natural source for tests and
/// demo reels.
pub struct ReplayProvider {
    entries: Arc<Vec<ScheduleEntry>>,
    timestamps: Vec<NaiveDateTime>,
    cursor: usize,
    speed: f64,
    tick_rate: f64,
    interval: Interval,
    tick: u64,
}

impl ReplayProvider {
    /// Create a replay over the given timestamp script.
    pub fn new(entries: Arc<Vec<ScheduleEntry>>, timestamps: Vec<NaiveDateTime>) -> Self {
        let interval = Self::paced_interval(DEFAULT_REPLAY_RATE, 1.0);
        debug!("Replay created: {} scripted moments at {}Hz", timestamps.len(), DEFAULT_REPLAY_RATE);

        Self {
            entries,
            timestamps,
            cursor: 0,
            speed: 1.0,
            tick_rate: DEFAULT_REPLAY_RATE,
            interval,
            tick: 0,
        }
    }

    /// Set playback speed.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.1, 100.0);
        self.interval = Self::paced_interval(self.tick_rate, self.speed);
        debug!("Replay speed set to {}x", self.speed);
    }

    /// Number of scripted moments not yet replayed.
    pub fn remaining(&self) -> usize {
        self.timestamps.len().saturating_sub(self.cursor)
    }

    /// Total number of scripted moments.
    pub fn total_moments(&self) -> usize {
        self.timestamps.len()
    }

    fn paced_interval(tick_rate: f64, speed: f64) -> Interval {
        let mut interval = interval(Duration::from_secs_f64(1.0 / (tick_rate * speed)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }
}

#[async_trait::async_trait]
impl MomentProvider for ReplayProvider {
    async fn next_moment(&mut self) -> Result<Option<MomentPacket>> {
        let Some(&timestamp) = self.timestamps.get(self.cursor) else {
            debug!("Reached end of replay after {} moments", self.cursor);
            return Ok(None);
        };

        self.interval.tick().await;

        self.cursor += 1;
        self.tick += 1;
        let moment = resolver::resolve_current_moment(&self.entries, timestamp);

        trace!(
            "Replay moment {}/{}: {:?} at {}",
            self.cursor,
            self.timestamps.len(),
            moment.kind(),
            timestamp
        );

        Ok(Some(MomentPacket::new(moment, self.tick)))
    }

    fn tick_rate(&self) -> f64 {
        self.tick_rate * self.speed
    }
}
