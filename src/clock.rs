//! Wall-clock abstractions and server-time alignment
//!
//! The resolver takes explicit timestamps; clocks are how the live pipeline
//! obtains them. [`SystemClock`] is the production source, [`FixedClock`]
//! drives tests, and [`SyncedClock`] layers a server-time offset on top of any
//! base clock so a skewed device still shows the right period.
//!
//! Fetching a time sample from a server is the host's job; this crate only
//! consumes the resulting [`SyncSample`].

use std::sync::Mutex;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeDelta};
use tracing::debug;

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> NaiveDateTime;
}

/// The host system clock, in local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A manually-advanced clock for tests and deterministic replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Create a clock frozen at the given instant.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().expect("clock lock poisoned") = now;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock lock poisoned");
        *guard += TimeDelta::from_std(by).unwrap_or(TimeDelta::zero());
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// One server-time measurement.
///
/// `round_trip` is the full request latency; half of it approximates the
/// one-way delay when deriving the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncSample {
    /// Server time as reported in the response.
    pub server_time: NaiveDateTime,
    /// Local time when the response arrived.
    pub client_time: NaiveDateTime,
    /// Full request round-trip duration.
    pub round_trip: Duration,
}

impl SyncSample {
    /// Offset to add to local time to approximate server time.
    pub fn offset(&self) -> TimeDelta {
        let half_trip =
            TimeDelta::from_std(self.round_trip / 2).unwrap_or(TimeDelta::zero());
        self.server_time - self.client_time + half_trip
    }
}

/// Quality grade of the current synchronization, by offset magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncQuality {
    /// No sample applied yet.
    Unsynced,
    /// Offset within 100ms.
    Excellent,
    /// Offset within 500ms.
    Good,
    /// Offset within 1s.
    Fair,
    /// Offset beyond 1s.
    Poor,
}

impl SyncQuality {
    fn grade(offset: TimeDelta) -> Self {
        let millis = offset.num_milliseconds().unsigned_abs();
        match millis {
            0..=100 => SyncQuality::Excellent,
            101..=500 => SyncQuality::Good,
            501..=1000 => SyncQuality::Fair,
            _ => SyncQuality::Poor,
        }
    }
}

/// How long a sync sample stays fresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncPolicy {
    /// Age beyond which a sample no longer counts as synced.
    pub staleness: Duration,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self { staleness: Duration::from_secs(30) }
    }
}

#[derive(Debug, Clone, Copy)]
struct SyncRecord {
    offset: TimeDelta,
    latency: Duration,
    synced_at: NaiveDateTime,
}

/// A base clock corrected by the latest server-time sample.
///
/// Until a sample is applied, and after one goes stale, `now()` falls back
/// to the base clock plus the last known offset, which degrades gracefully to
/// plain local time when no sample was ever seen.
pub struct SyncedClock<C: Clock = SystemClock> {
    base: C,
    policy: SyncPolicy,
    record: Mutex<Option<SyncRecord>>,
}

impl SyncedClock<SystemClock> {
    /// Synced clock over the system clock with the default policy.
    pub fn system() -> Self {
        Self::new(SystemClock, SyncPolicy::default())
    }
}

impl<C: Clock> SyncedClock<C> {
    /// Create a synced clock over an arbitrary base.
    pub fn new(base: C, policy: SyncPolicy) -> Self {
        Self { base, policy, record: Mutex::new(None) }
    }

    /// Apply a fresh server-time sample.
    pub fn apply(&self, sample: SyncSample) {
        let offset = sample.offset();
        debug!(
            "Time sync applied: offset {}ms, latency {}ms",
            offset.num_milliseconds(),
            sample.round_trip.as_millis()
        );
        *self.record.lock().expect("sync lock poisoned") = Some(SyncRecord {
            offset,
            latency: sample.round_trip,
            synced_at: self.base.now(),
        });
    }

    /// Last known offset from local time, zero when never synced.
    pub fn offset(&self) -> TimeDelta {
        self.record
            .lock()
            .expect("sync lock poisoned")
            .map(|r| r.offset)
            .unwrap_or_else(TimeDelta::zero)
    }

    /// Round-trip latency of the last applied sample.
    pub fn latency(&self) -> Option<Duration> {
        self.record.lock().expect("sync lock poisoned").map(|r| r.latency)
    }

    /// Grade of the current synchronization.
    pub fn quality(&self) -> SyncQuality {
        match *self.record.lock().expect("sync lock poisoned") {
            None => SyncQuality::Unsynced,
            Some(record) => SyncQuality::grade(record.offset),
        }
    }

    /// Whether a fresh (non-stale) sample is in effect.
    pub fn is_synced(&self) -> bool {
        let guard = self.record.lock().expect("sync lock poisoned");
        match *guard {
            None => false,
            Some(record) => {
                let age = self.base.now() - record.synced_at;
                age.to_std().map(|age| age < self.policy.staleness).unwrap_or(false)
            }
        }
    }
}

impl<C: Clock> Clock for SyncedClock<C> {
    fn now(&self) -> NaiveDateTime {
        // Stale offsets still beat raw local time; drift since the last
        // sample is bounded by the device clock, not the network.
        self.base.now() + self.offset()
    }
}
