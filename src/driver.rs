//! Driver spawns and manages the moment polling task

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::provider::MomentProvider;
use crate::resolver::build_daily_agenda;
use crate::types::{DailyAgenda, ResolvedMoment, ScheduleEntry, Weekday};

/// Result of spawning driver tasks
pub struct DriverChannels {
    /// Receiver for resolved moments
    pub moments: watch::Receiver<Option<Arc<ResolvedMoment>>>,
    /// Receiver for daily agenda updates; `None` on weekends
    pub agendas: watch::Receiver<Option<Arc<DailyAgenda>>>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the moment polling task
///
/// One task owns the provider, polls it at its native pace, and publishes
/// moments over a watch channel (latest-wins, so slow subscribers never back
/// up the poll loop). When the resolved weekday changes it also rebuilds the
/// daily agenda and publishes that on a second channel. The agenda is cheap
/// to build, so unlike heavier derived data there is no reason to offload it.
pub struct Driver;

impl Driver {
    /// Spawn the driver task for the given provider
    ///
    /// Returns watch receivers for moments and agendas, plus a cancellation
    /// token. Cancelling the token is the supported way to stop polling;
    /// dropping every receiver also winds the task down on its next send.
    pub fn spawn<P>(provider: P, entries: Arc<Vec<ScheduleEntry>>) -> DriverChannels
    where
        P: MomentProvider,
    {
        let (moment_tx, moment_rx) = watch::channel(None);
        let (agenda_tx, agenda_rx) = watch::channel(None);

        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::poll_task(provider, entries, moment_tx, agenda_tx, cancel_task).await;
        });

        DriverChannels { moments: moment_rx, agendas: agenda_rx, cancel }
    }

    /// Poll task - reads moments and detects weekday changes
    async fn poll_task<P>(
        mut provider: P,
        entries: Arc<Vec<ScheduleEntry>>,
        moment_tx: watch::Sender<Option<Arc<ResolvedMoment>>>,
        agenda_tx: watch::Sender<Option<Arc<DailyAgenda>>>,
        cancel: CancellationToken,
    ) where
        P: MomentProvider,
    {
        info!("Moment poll task started");
        let mut moment_count = 0u64;
        let mut error_count = 0u32;
        let mut last_weekday: Option<Option<Weekday>> = None;
        const MAX_ERRORS: u32 = 10;

        loop {
            if cancel.is_cancelled() {
                info!("Moment poll cancelled");
                break;
            }

            // Allow cancellation while the provider waits out its interval.
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Moment poll cancelled during read");
                    break;
                }
                result = provider.next_moment() => result,
            };

            match result {
                Ok(Some(packet)) => {
                    moment_count += 1;
                    error_count = 0;
                    let weekday = packet.moment.weekday;

                    trace!(
                        "Moment {}: tick={}, kind={:?}",
                        moment_count,
                        packet.tick,
                        packet.moment.kind()
                    );

                    if last_weekday != Some(weekday) {
                        debug!(
                            "Weekday changed: {:?} -> {:?}, rebuilding agenda",
                            last_weekday.flatten(),
                            weekday
                        );

                        let agenda = weekday
                            .map(|day| Arc::new(build_daily_agenda(&entries, day)));
                        let _ = agenda_tx.send(agenda);
                        last_weekday = Some(weekday);
                    }

                    if moment_tx.send(Some(Arc::new(packet.moment))).is_err() {
                        debug!("Moment receiver dropped, shutting down");
                        break;
                    }
                }
                Ok(None) => {
                    info!("Provider ended after {} moments", moment_count);
                    let _ = moment_tx.send(None);
                    let _ = agenda_tx.send(None);
                    break;
                }
                Err(e) => {
                    // Transient provider failure - back off rather than crash.
                    error_count += 1;
                    error!("Provider error ({}/{}): {}", error_count, MAX_ERRORS, e);

                    if error_count >= MAX_ERRORS {
                        error!("Too many provider errors, shutting down");
                        let _ = moment_tx.send(None);
                        let _ = agenda_tx.send(None);
                        break;
                    }

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff = std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        info!("Moment poll task ended (processed {} moments)", moment_count);
    }
}
