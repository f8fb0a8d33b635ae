mod catalog;
mod error;
mod host;
mod provider;

pub use catalog::ANDROID_PAYMENT_APPS;
pub use error::AndroidError;
pub use host::{
    ActivityHost, AndroidHost, AppUpdateInfo, AppUpdateManager, InstallStateCallback,
    PackageInfo, PackageRegistry, UpdateAvailability,
};
pub use provider::AndroidProvider;
