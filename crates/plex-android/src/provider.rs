use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use plex_backend::{
    CatalogEntry, DetectionMethod, InstallStateSubscription, LookupTarget, OracleError,
    PermittedKinds, Platform, PlatformProvider, SubscriptionId, UpdateKind, UpdateSignal,
};
use tokio::sync::mpsc;

use crate::catalog::ANDROID_PAYMENT_APPS;
use crate::error::AndroidError;
use crate::host::{AndroidHost, AppUpdateInfo, AppUpdateManager, UpdateAvailability};

pub struct AndroidProvider {
    host: AndroidHost,
}

impl AndroidProvider {
    #[must_use]
    pub fn new(host: AndroidHost) -> Self {
        Self { host }
    }

    fn update_manager(&self) -> Result<&Arc<dyn AppUpdateManager>, AndroidError> {
        self.host.update_manager.as_ref().ok_or(AndroidError::NoContext)
    }
}

fn signal_from_info(info: &AppUpdateInfo) -> UpdateSignal {
    let available = info.availability == UpdateAvailability::UpdateAvailable;
    UpdateSignal::Managed {
        available,
        permitted: PermittedKinds {
            immediate: info.immediate_allowed,
            flexible: info.flexible_allowed,
        },
        version_code: available.then_some(info.available_version_code),
    }
}

#[async_trait]
impl PlatformProvider for AndroidProvider {
    fn name(&self) -> &'static str {
        "android"
    }

    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn detection_method(&self) -> DetectionMethod {
        DetectionMethod::PackageManager
    }

    fn catalog(&self) -> &[CatalogEntry] {
        ANDROID_PAYMENT_APPS
    }

    fn probe_token<'a>(&self, entry: &'a CatalogEntry) -> &'a str {
        entry.identifier
    }

    fn can_probe(&self) -> bool {
        self.host.registry.is_some()
    }

    fn exists(&self, probe_token: &str) -> Result<bool, OracleError> {
        let registry = self.host.registry.as_ref().ok_or(AndroidError::NoContext)?;
        registry.package_info(probe_token)?;
        Ok(true)
    }

    fn local_version(&self) -> Result<String, OracleError> {
        let registry = self.host.registry.as_ref().ok_or(AndroidError::NoContext)?;
        let package_name = self
            .host
            .package_name
            .as_deref()
            .ok_or(AndroidError::NoContext)?;
        let info = registry.package_info(package_name)?;
        Ok(info.version_name.unwrap_or_default())
    }

    fn app_identifier(&self) -> Option<String> {
        self.host.package_name.clone()
    }

    async fn update_signal(&self, target: &LookupTarget) -> Result<UpdateSignal, OracleError> {
        debug!("Querying app update manager (lookup target {target:?} is implied)");
        let info = self.update_manager()?.app_update_info().await?;
        Ok(signal_from_info(&info))
    }

    async fn trigger_native_flow(&self, kind: UpdateKind) -> Result<bool, OracleError> {
        let has_activity = self
            .host
            .activity
            .as_ref()
            .is_some_and(|activity| activity.has_foreground_activity());
        if !has_activity {
            return Err(AndroidError::NoActivity.into());
        }

        let manager = self.update_manager()?;
        let info = manager.app_update_info().await?;
        Ok(manager.start_update_flow(&info, kind).await?)
    }

    fn subscribe_install_state(&self) -> Result<InstallStateSubscription, OracleError> {
        let manager = self.update_manager()?;
        let (sender, states) = mpsc::unbounded_channel();
        let id = manager.register_listener(Box::new(move |status| {
            let _ = sender.send(status);
        }));
        debug!("Registered install state listener {id}");
        Ok(InstallStateSubscription {
            id: SubscriptionId(id),
            states,
        })
    }

    fn unsubscribe_install_state(&self, id: SubscriptionId) {
        if let Ok(manager) = self.update_manager() {
            manager.unregister_listener(id.0);
            debug!("Unregistered install state listener {}", id.0);
        }
    }

    async fn complete_update(&self) -> Result<(), OracleError> {
        Ok(self.update_manager()?.complete_update().await?)
    }
}
