//! Provider trait for moment sources

use crate::Result;
use crate::types::MomentPacket;

/// Trait for sources of resolved schedule moments
///
/// Providers abstract over where timestamps come from (live clock, scripted
/// replay) and handle their own pacing internally. The trait is deliberately
/// small: one polling method plus the native cadence.
#[async_trait::async_trait]
pub trait MomentProvider: Send + 'static {
    /// Get the next resolved moment
    ///
    /// Returns:
    /// - `Ok(Some(packet))` - New moment available
    /// - `Ok(None)` - Source exhausted (normal termination; live sources never end)
    /// - `Err(e)` - Transient failure, the driver retries with backoff
    async fn next_moment(&mut self) -> Result<Option<MomentPacket>>;

    /// Native polling rate in Hz
    ///
    /// 1Hz for the live clock; replays pace at whatever they were built with.
    fn tick_rate(&self) -> f64;
}
