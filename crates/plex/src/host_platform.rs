use std::sync::Arc;

use plex_android::{AndroidHost, AndroidProvider};
use plex_backend::{Platform, PlatformProvider};
use plex_ios::{IosHost, IosProvider, ItunesLookup, StoreLookup};

use crate::error::BridgeError;
use crate::settings::BridgeSettings;

/// The host handles the embedding app passes in at startup.
#[derive(Clone)]
pub enum HostPlatform {
    Android(AndroidHost),
    Ios(IosHost),
}

impl HostPlatform {
    #[must_use]
    pub fn kind(&self) -> Platform {
        match self {
            Self::Android(_) => Platform::Android,
            Self::Ios(_) => Platform::Ios,
        }
    }

    #[must_use]
    pub fn into_provider(self) -> Arc<dyn PlatformProvider> {
        match self {
            Self::Android(host) => Arc::new(AndroidProvider::new(host)),
            Self::Ios(host) => Arc::new(IosProvider::new(host)),
        }
    }
}

/// iTunes lookup client honoring the configured HTTP timeout.
///
/// # Errors
/// Returns an error when the HTTP client cannot be built.
pub fn itunes_store(settings: &BridgeSettings) -> Result<Arc<dyn StoreLookup>, BridgeError> {
    Ok(Arc::new(ItunesLookup::new(settings.http_timeout())?))
}
