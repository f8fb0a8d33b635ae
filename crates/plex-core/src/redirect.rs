use std::time::Duration;

use log::{debug, warn};
use plex_backend::PlatformProvider;

use crate::timeout::with_timeout;

const NATIVE_STORE_SCHEME: &str = "itms-apps://";
const WEB_SCHEME: &str = "https://";
const STORE_HOST: &str = "apps.apple.com";

/// Storefront URLs tried in order: the native store scheme, then the web page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    pub native: Option<String>,
    pub web: Option<String>,
}

impl RedirectTargets {
    /// Targets built straight from a numeric store id.
    #[must_use]
    pub fn for_store_id(store_id: &str, country_code: Option<&str>) -> Self {
        let country_path = country_code
            .filter(|c| !c.is_empty())
            .map(|c| format!("/{}", c.to_lowercase()))
            .unwrap_or_default();
        let path = format!("{STORE_HOST}{country_path}/app/id{store_id}");

        Self {
            native: Some(format!("{NATIVE_STORE_SCHEME}{path}")),
            web: Some(format!("{WEB_SCHEME}{path}")),
        }
    }

    /// Targets derived from a looked-up store listing URL.
    #[must_use]
    pub fn for_store_url(store_url: &str) -> Self {
        let native = store_url
            .strip_prefix(WEB_SCHEME)
            .map(|rest| format!("{NATIVE_STORE_SCHEME}{rest}"));

        Self {
            native,
            web: Some(store_url.to_string()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.native.is_none() && self.web.is_none()
    }
}

/// Open the native target, falling back to the web target.
///
/// Returns whether navigation was initiated. Open faults count as failures.
pub async fn open_with_fallback(
    provider: &dyn PlatformProvider,
    targets: &RedirectTargets,
    timeout: Duration,
) -> bool {
    for url in [targets.native.as_deref(), targets.web.as_deref()]
        .into_iter()
        .flatten()
    {
        match with_timeout(timeout, "open store url", provider.open_url(url)).await {
            Ok(true) => {
                debug!("Opened store url {url}");
                return true;
            }
            Ok(false) => debug!("Host declined to open {url}"),
            Err(error) => warn!("Failed to open {url}: {error}"),
        }
    }

    false
}
