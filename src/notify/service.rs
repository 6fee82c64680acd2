//! Deduplicating alert service with explicit lifecycle

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::alert::{Alert, AlertKey, AlertPolicy, plan_alert};
use super::Notifier;
use crate::types::{ResolvedMoment, ScheduleEntry};
use crate::Result;

/// Deduplicating class-alert service.
///
/// Owns the "last notified" key, the only cross-cutting mutable state in the
/// whole notification path, as an explicitly constructed value rather than a
/// module-level singleton. One instance per consuming view; drop it and the
/// state goes with it.
pub struct ClassAlerts<N: Notifier> {
    notifier: N,
    policy: AlertPolicy,
    last_key: Option<AlertKey>,
}

impl<N: Notifier> ClassAlerts<N> {
    /// Create a service around a dispatcher.
    pub fn new(notifier: N, policy: AlertPolicy) -> Self {
        Self { notifier, policy, last_key: None }
    }

    /// Evaluate one resolved moment, dispatching at most one notification.
    ///
    /// Returns the alert that was actually sent, `None` when nothing was
    /// warranted, permission is missing, or the planned alert already fired
    /// for this key.
    pub async fn observe(
        &mut self,
        entries: &[ScheduleEntry],
        moment: &ResolvedMoment,
    ) -> Result<Option<Alert>> {
        if !self.notifier.permission().is_granted() {
            return Ok(None);
        }

        let Some(alert) = plan_alert(entries, moment.timestamp, self.policy) else {
            return Ok(None);
        };

        if self.last_key == Some(alert.key) {
            debug!("Alert already fired for {:?}, suppressing repeat", alert.key);
            return Ok(None);
        }

        self.notifier.notify(&alert.title, &alert.body).await?;
        self.last_key = Some(alert.key);
        info!("Dispatched alert {:?}", alert.key);
        Ok(Some(alert))
    }

    /// The dispatcher this service wraps.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

/// Handle to a background alert task.
///
/// Disposing (or dropping) the handle cancels the task, so alert polling
/// never outlives the view that wanted it.
pub struct AlertTask {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl AlertTask {
    /// Spawn an alert loop over a moment stream.
    ///
    /// The task evaluates every moment the stream yields and stops when the
    /// stream ends or the handle is disposed. Dispatch failures are logged
    /// and do not stop the loop; a notifier that errors once may recover.
    pub fn spawn<N, S>(
        moments: S,
        entries: Arc<Vec<ScheduleEntry>>,
        notifier: N,
        policy: AlertPolicy,
    ) -> AlertTask
    where
        N: Notifier + 'static,
        S: Stream<Item = Arc<ResolvedMoment>> + Send + Unpin + 'static,
    {
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut service = ClassAlerts::new(notifier, policy);
            let mut moments = moments;

            info!("Alert task started");
            loop {
                let moment = tokio::select! {
                    _ = cancel_task.cancelled() => {
                        info!("Alert task cancelled");
                        break;
                    }
                    next = moments.next() => match next {
                        Some(moment) => moment,
                        None => {
                            info!("Moment stream ended, alert task stopping");
                            break;
                        }
                    },
                };

                if let Err(e) = service.observe(&entries, &moment).await {
                    warn!("Alert dispatch failed: {}", e);
                }
            }
        });

        AlertTask { cancel, handle: Some(handle) }
    }

    /// Cancel the task and wait for it to finish.
    pub async fn dispose(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Whether the task has already finished.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }
}

impl Drop for AlertTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
