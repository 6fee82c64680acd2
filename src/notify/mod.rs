//! Class notifications: dispatch trait, permission model, alert service
//!
//! The crate never talks to a platform notification API itself. Hosts
//! implement [`Notifier`] over whatever their platform offers; the
//! [`ClassAlerts`] service decides *when* to fire and deduplicates repeats,
//! the notifier only displays. Hosts without any notification capability plug
//! in [`NoopNotifier`] and everything degrades to silence instead of errors.

mod alert;
mod service;

pub use alert::{Alert, AlertKey, AlertKind, AlertPolicy, plan_alert};
pub use service::{AlertTask, ClassAlerts};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// Notification permission as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    /// The user granted notification permission.
    Granted,
    /// The user declined, or the capability is absent.
    Denied,
    /// Permission has not been requested yet.
    Default,
}

impl Permission {
    /// Whether notifications may be displayed.
    pub fn is_granted(self) -> bool {
        matches!(self, Permission::Granted)
    }
}

/// Platform notification dispatcher.
///
/// Implementations display a notification when permission allows it.
/// Requesting permission is the host's UX flow; declining is a value, not an
/// error (see the crate error taxonomy).
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Current permission state.
    fn permission(&self) -> Permission;

    /// Ask the user for permission. Implementations must be idempotent once
    /// a terminal state (granted/denied) is reached.
    async fn request_permission(&self) -> Result<Permission>;

    /// Display a notification.
    async fn notify(&self, title: &str, body: &str) -> Result<()>;

    /// Whether the host has a notification capability at all.
    fn available(&self) -> bool {
        true
    }
}

/// Forward the dispatcher trait through a shared `Arc`, so a notifier can be
/// retained by the caller and handed to a background task at the same time.
#[async_trait::async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn permission(&self) -> Permission {
        (**self).permission()
    }

    async fn request_permission(&self) -> Result<Permission> {
        (**self).request_permission().await
    }

    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        (**self).notify(title, body).await
    }

    fn available(&self) -> bool {
        (**self).available()
    }
}

/// Dispatcher for hosts without a notification capability.
///
/// Reports itself unavailable and permission denied; `notify` succeeds as a
/// no-op so callers never have to special-case absent platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait::async_trait]
impl Notifier for NoopNotifier {
    fn permission(&self) -> Permission {
        Permission::Denied
    }

    async fn request_permission(&self) -> Result<Permission> {
        Ok(Permission::Denied)
    }

    async fn notify(&self, title: &str, _body: &str) -> Result<()> {
        debug!("Notification capability absent, dropping: {}", title);
        Ok(())
    }

    fn available(&self) -> bool {
        false
    }
}
