use std::sync::Arc;

use log::{debug, info, warn};
use plex_backend::{InstallStateSubscription, InstallStatus, PlatformProvider, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Registered,
    /// `DOWNLOADED` was seen and completion has been requested.
    Completing,
    Terminal,
}

/// What the driver must do after feeding a status into the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerAction {
    Wait,
    CompleteThenDeregister,
    Deregister,
}

/// Lifecycle of a flexible-update install listener.
///
/// Every path out of `Registered` ends in `Terminal`, and every transition
/// into `Terminal` is paired with exactly one `Deregister` (or
/// `CompleteThenDeregister`) action.
#[derive(Debug)]
pub struct DeferredInstallListener {
    id: SubscriptionId,
    state: ListenerState,
}

impl DeferredInstallListener {
    #[must_use]
    pub fn new(id: SubscriptionId) -> Self {
        Self {
            id,
            state: ListenerState::Registered,
        }
    }

    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> ListenerState {
        self.state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state == ListenerState::Terminal
    }

    pub fn observe(&mut self, status: InstallStatus) -> ListenerAction {
        if self.state != ListenerState::Registered {
            return ListenerAction::Wait;
        }

        match status {
            InstallStatus::Downloaded => {
                self.state = ListenerState::Completing;
                ListenerAction::CompleteThenDeregister
            }
            InstallStatus::Installed | InstallStatus::Failed | InstallStatus::Canceled => {
                self.state = ListenerState::Terminal;
                ListenerAction::Deregister
            }
            InstallStatus::Unknown
            | InstallStatus::Pending
            | InstallStatus::Downloading
            | InstallStatus::Installing => ListenerAction::Wait,
        }
    }

    /// Completion was requested; the listener is done either way.
    pub fn finish_completion(&mut self) {
        if self.state == ListenerState::Completing {
            self.state = ListenerState::Terminal;
        }
    }

    /// The state stream ended before a terminal status arrived.
    ///
    /// Returns `true` when the caller still owes a deregistration.
    pub fn close(&mut self) -> bool {
        let owes_deregister = !self.is_terminal();
        self.state = ListenerState::Terminal;
        owes_deregister
    }
}

/// Drive the listener on a detached task; it releases its own subscription.
pub fn spawn_install_listener(
    provider: Arc<dyn PlatformProvider>,
    subscription: InstallStateSubscription,
) {
    tokio::spawn(drive_install_listener(provider, subscription));
}

pub async fn drive_install_listener(
    provider: Arc<dyn PlatformProvider>,
    subscription: InstallStateSubscription,
) -> ListenerState {
    let InstallStateSubscription { id, mut states } = subscription;
    let mut listener = DeferredInstallListener::new(id);

    while let Some(status) = states.recv().await {
        debug!("Install state {status:?} for listener {:?}", listener.id());
        match listener.observe(status) {
            ListenerAction::Wait => {}
            ListenerAction::CompleteThenDeregister => {
                info!("Flexible update downloaded, completing install");
                if let Err(error) = provider.complete_update().await {
                    warn!("Failed to complete flexible update: {error}");
                }
                listener.finish_completion();
                provider.unsubscribe_install_state(listener.id());
                break;
            }
            ListenerAction::Deregister => {
                info!("Flexible update ended with {status:?}");
                provider.unsubscribe_install_state(listener.id());
                break;
            }
        }
    }

    if listener.close() {
        debug!("Install state stream closed, releasing listener {:?}", listener.id());
        provider.unsubscribe_install_state(listener.id());
    }

    listener.state()
}
