//! Installable-app prompt service
//!
//! Wraps the platform's install-prompt lifecycle behind an explicitly
//! constructed service. The platform glue calls [`InstallService::offer_received`]
//! when the host signals installability (the `beforeinstallprompt` analog);
//! everything else is queries plus one consuming `install` call. There is no
//! module-level manager and no hidden process-wide state: one service per
//! view, owned and dropped like any other value.

use tracing::{debug, info, warn};

use crate::error::{Result, ScheduleError};

/// Outcome of showing the platform install prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The user accepted installation.
    Accepted,
    /// The user dismissed the prompt.
    Dismissed,
}

/// Host-side install capability.
#[async_trait::async_trait]
pub trait InstallHost: Send + Sync {
    /// Whether the app is already running installed (standalone).
    fn standalone(&self) -> bool;

    /// Show the deferred install prompt and report the user's choice.
    ///
    /// Hosts without the capability return a `Capability` error; the service
    /// degrades that to a quiet `false` rather than surfacing it.
    async fn prompt(&self) -> Result<InstallOutcome>;
}

/// Install-prompt state machine over an [`InstallHost`].
pub struct InstallService<H: InstallHost> {
    host: H,
    offer_pending: bool,
    installed: bool,
}

impl<H: InstallHost> InstallService<H> {
    /// Create a service; installation state is read from the host once.
    pub fn new(host: H) -> Self {
        let installed = host.standalone();
        Self { host, offer_pending: false, installed }
    }

    /// Record that the platform offered an install prompt.
    pub fn offer_received(&mut self) {
        debug!("Install prompt offer received");
        self.offer_pending = true;
    }

    /// Whether an install can be triggered right now.
    pub fn can_install(&self) -> bool {
        self.offer_pending && !self.installed
    }

    /// Whether the app is already installed.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Show the install prompt, consuming the pending offer on acceptance.
    ///
    /// Returns `Ok(false)` when no offer is pending, the user dismisses, or
    /// the host lacks the capability entirely; other host failures propagate.
    pub async fn install(&mut self) -> Result<bool> {
        if !self.can_install() {
            debug!("No install prompt available");
            return Ok(false);
        }

        match self.host.prompt().await {
            Ok(InstallOutcome::Accepted) => {
                info!("App installed");
                self.offer_pending = false;
                self.installed = true;
                Ok(true)
            }
            Ok(InstallOutcome::Dismissed) => {
                debug!("Install prompt dismissed");
                Ok(false)
            }
            Err(ScheduleError::Capability { feature }) => {
                warn!("Install unavailable: {}", feature);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
