//! Board connection over a moment feed

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::dataset;
use crate::driver::Driver;
use crate::provider::MomentProvider;
use crate::providers::{LiveProvider, ReplayProvider};
use crate::types::{DailyAgenda, RefreshRate, ResolvedMoment, ScheduleEntry};
use crate::stream::ThrottleExt;
use crate::Result;

/// A running schedule board: the loaded dataset plus its moment feed.
///
/// Construction spawns the driver task; dropping the board cancels it, which
/// releases the periodic poll. No timer outlives its consumer.
#[derive(Debug)]
pub struct Board {
    /// Moment watch receiver
    moments: watch::Receiver<Option<Arc<ResolvedMoment>>>,

    /// Agenda watch receiver
    agendas: watch::Receiver<Option<Arc<DailyAgenda>>>,

    /// The loaded dataset
    entries: Arc<Vec<ScheduleEntry>>,

    /// Provider frequency
    source_hz: f64,

    /// Cancellation token for stopping the poll task
    cancel: CancellationToken,
}

impl Board {
    /// Open a live board from a JSON dataset file, on the system clock.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening schedule dataset: {}", path.display());
        let entries = dataset::load_entries(path)?;
        Self::with_entries(entries).await
    }

    /// Open a live board over pre-validated entries, on the system clock.
    pub async fn with_entries(entries: Vec<ScheduleEntry>) -> Result<Self> {
        Self::with_clock(entries, SystemClock).await
    }

    /// Open a live board on an injected clock.
    pub async fn with_clock<C: Clock + 'static>(
        entries: Vec<ScheduleEntry>,
        clock: C,
    ) -> Result<Self> {
        dataset::validate_entries(&entries)?;
        let entries = Arc::new(entries);
        let provider = LiveProvider::new(clock, Arc::clone(&entries));
        Ok(Self::spawn(provider, entries).await)
    }

    /// Open a board that replays a scripted timestamp sequence.
    ///
    /// The feed ends when the script is exhausted.
    pub async fn replay(
        entries: Vec<ScheduleEntry>,
        timestamps: Vec<NaiveDateTime>,
    ) -> Result<Self> {
        dataset::validate_entries(&entries)?;
        let entries = Arc::new(entries);
        let provider = ReplayProvider::new(Arc::clone(&entries), timestamps);
        Ok(Self::spawn(provider, entries).await)
    }

    /// Spawn the driver for an arbitrary provider and wait for the feed.
    pub async fn spawn<P: MomentProvider>(provider: P, entries: Arc<Vec<ScheduleEntry>>) -> Self {
        let source_hz = provider.tick_rate();
        let channels = Driver::spawn(provider, Arc::clone(&entries));

        // Wait for the first moment so subscribers see a primed feed.
        let mut moment_rx = channels.moments.clone();
        let timeout = std::time::Duration::from_secs(5);
        let wait_result = tokio::time::timeout(timeout, async {
            loop {
                if moment_rx.borrow_and_update().is_some() {
                    break;
                }
                // A closed channel means the provider ended before producing
                // anything (e.g. an empty replay) - nothing to wait for.
                if moment_rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await;

        if wait_result.is_err() {
            warn!("Timeout waiting for first resolved moment");
        }

        info!("Board opened ({}Hz, {} entries)", source_hz, entries.len());

        Self {
            moments: channels.moments,
            agendas: channels.agendas,
            entries,
            source_hz,
            cancel: channels.cancel,
        }
    }

    /// Subscribe to resolved moments at the given refresh rate.
    ///
    /// Below the provider's native rate the stream is throttled latest-wins;
    /// at or above it, moments pass straight through.
    pub fn subscribe(
        &self,
        rate: RefreshRate,
    ) -> impl Stream<Item = Arc<ResolvedMoment>> + Send + use<> {
        let moments = WatchStream::new(self.moments.clone()).filter_map(|opt| async move { opt });

        match rate.throttle_interval(self.source_hz) {
            None => moments.boxed(),
            Some(gap) => moments.throttle(gap).boxed(),
        }
    }

    /// Agenda updates as a stream; a new agenda arrives when the weekday
    /// changes.
    pub fn agenda_updates(&self) -> impl Stream<Item = Arc<DailyAgenda>> + use<> {
        WatchStream::new(self.agendas.clone()).filter_map(|opt| async move { opt })
    }

    /// The most recently resolved moment, if the feed has produced one.
    pub fn current_moment(&self) -> Option<Arc<ResolvedMoment>> {
        self.moments.borrow().clone()
    }

    /// Today's agenda; `None` on weekends or before the feed primes.
    pub fn current_agenda(&self) -> Option<Arc<DailyAgenda>> {
        self.agendas.borrow().clone()
    }

    /// The loaded dataset.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// The provider's native polling frequency.
    pub fn source_hz(&self) -> f64 {
        self.source_hz
    }
}

impl Drop for Board {
    fn drop(&mut self) {
        debug!("Dropping board");
        // Cancel the poll task on drop so no interval keeps firing.
        self.cancel.cancel();
    }
}
