use async_trait::async_trait;

use crate::error::OracleError;
use crate::types::{
    CatalogEntry, DetectionMethod, InstallStateSubscription, LookupTarget, Platform,
    SubscriptionId, UpdateKind, UpdateSignal,
};

/// Everything the core needs from the host platform.
///
/// One implementation exists per platform and is chosen once at startup. The
/// prober and the resolver only ever talk to this trait.
#[async_trait]
pub trait PlatformProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn platform(&self) -> Platform;

    fn detection_method(&self) -> DetectionMethod;

    fn catalog(&self) -> &[CatalogEntry];

    /// The key handed to [`PlatformProvider::exists`] for `entry`.
    fn probe_token<'a>(&self, entry: &'a CatalogEntry) -> &'a str;

    /// `false` when the host cannot be probed at all (no registry context).
    fn can_probe(&self) -> bool {
        true
    }

    /// Existence oracle. `Err(OracleError::NotFound)` is a negative answer.
    fn exists(&self, probe_token: &str) -> Result<bool, OracleError>;

    fn local_version(&self) -> Result<String, OracleError>;

    /// The running application's own package or bundle identifier.
    fn app_identifier(&self) -> Option<String>;

    async fn update_signal(&self, target: &LookupTarget) -> Result<UpdateSignal, OracleError>;

    async fn open_url(&self, _url: &str) -> Result<bool, OracleError> {
        Err(OracleError::Unsupported {
            operation: "open_url",
        })
    }

    async fn trigger_native_flow(&self, _kind: UpdateKind) -> Result<bool, OracleError> {
        Err(OracleError::Unsupported {
            operation: "trigger_native_flow",
        })
    }

    fn subscribe_install_state(&self) -> Result<InstallStateSubscription, OracleError> {
        Err(OracleError::Unsupported {
            operation: "subscribe_install_state",
        })
    }

    fn unsubscribe_install_state(&self, _id: SubscriptionId) {}

    async fn complete_update(&self) -> Result<(), OracleError> {
        Err(OracleError::Unsupported {
            operation: "complete_update",
        })
    }
}
