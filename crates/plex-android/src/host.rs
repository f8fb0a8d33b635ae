use std::sync::Arc;

use async_trait::async_trait;
use plex_backend::{InstallStatus, UpdateKind};

use crate::error::AndroidError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub package_name: String,
    pub version_name: Option<String>,
    pub version_code: i64,
}

/// The installed-package registry.
pub trait PackageRegistry: Send + Sync {
    /// `Err(AndroidError::NameNotFound)` when the package is not installed.
    fn package_info(&self, package_name: &str) -> Result<PackageInfo, AndroidError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAvailability {
    Unknown,
    UpdateNotAvailable,
    UpdateAvailable,
    DeveloperTriggeredUpdateInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUpdateInfo {
    pub availability: UpdateAvailability,
    pub available_version_code: i64,
    pub immediate_allowed: bool,
    pub flexible_allowed: bool,
}

pub type InstallStateCallback = Box<dyn Fn(InstallStatus) + Send + Sync>;

/// The platform's in-app update manager.
#[async_trait]
pub trait AppUpdateManager: Send + Sync {
    async fn app_update_info(&self) -> Result<AppUpdateInfo, AndroidError>;

    /// Launch the update flow; `Ok(true)` when the flow was shown.
    async fn start_update_flow(
        &self,
        info: &AppUpdateInfo,
        kind: UpdateKind,
    ) -> Result<bool, AndroidError>;

    fn register_listener(&self, callback: InstallStateCallback) -> u64;

    fn unregister_listener(&self, id: u64);

    async fn complete_update(&self) -> Result<(), AndroidError>;
}

pub trait ActivityHost: Send + Sync {
    fn has_foreground_activity(&self) -> bool;
}

/// Handles the Android host hands over at startup.
#[derive(Clone)]
pub struct AndroidHost {
    pub package_name: Option<String>,
    pub registry: Option<Arc<dyn PackageRegistry>>,
    pub update_manager: Option<Arc<dyn AppUpdateManager>>,
    pub activity: Option<Arc<dyn ActivityHost>>,
}
