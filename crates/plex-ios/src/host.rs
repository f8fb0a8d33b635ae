use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use crate::lookup::StoreLookup;

/// "Can this URL be opened" check. Must not launch anything.
pub trait SchemeProber: Send + Sync {
    fn can_open_url(&self, url: &str) -> bool;
}

/// External navigation. `true` once the host accepted the URL.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    async fn open(&self, url: &str) -> bool;
}

/// Opens URLs with the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUrlOpener;

#[async_trait]
impl UrlOpener for SystemUrlOpener {
    async fn open(&self, url: &str) -> bool {
        match open::that_detached(url) {
            Ok(()) => true,
            Err(error) => {
                warn!("System opener rejected {url}: {error}");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleInfo {
    pub short_version: Option<String>,
    pub bundle_identifier: Option<String>,
}

/// Handles the iOS host hands over at startup.
#[derive(Clone)]
pub struct IosHost {
    pub bundle: BundleInfo,
    pub scheme_prober: Option<Arc<dyn SchemeProber>>,
    pub opener: Option<Arc<dyn UrlOpener>>,
    pub store: Arc<dyn StoreLookup>,
}
