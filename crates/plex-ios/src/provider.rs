use async_trait::async_trait;
use log::debug;
use plex_backend::{
    CatalogEntry, DetectionMethod, LookupTarget, OracleError, Platform, PlatformProvider,
    UpdateSignal,
};

use crate::catalog::IOS_PAYMENT_APPS;
use crate::host::IosHost;

pub struct IosProvider {
    host: IosHost,
}

impl IosProvider {
    #[must_use]
    pub fn new(host: IosHost) -> Self {
        Self { host }
    }
}

fn parse_url(operation: &'static str, url: &str) -> Result<reqwest::Url, OracleError> {
    reqwest::Url::parse(url).map_err(|error| OracleError::malformed_from(operation, error))
}

#[async_trait]
impl PlatformProvider for IosProvider {
    fn name(&self) -> &'static str {
        "ios"
    }

    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn detection_method(&self) -> DetectionMethod {
        DetectionMethod::UrlScheme
    }

    fn catalog(&self) -> &[CatalogEntry] {
        IOS_PAYMENT_APPS
    }

    fn probe_token<'a>(&self, entry: &'a CatalogEntry) -> &'a str {
        entry.url_scheme
    }

    fn can_probe(&self) -> bool {
        self.host.scheme_prober.is_some()
    }

    fn exists(&self, probe_token: &str) -> Result<bool, OracleError> {
        let prober = self
            .host
            .scheme_prober
            .as_ref()
            .ok_or(OracleError::NoContext {
                handle: "application",
            })?;
        let url = parse_url("scheme probe", &format!("{probe_token}://"))?;
        Ok(prober.can_open_url(url.as_str()))
    }

    fn local_version(&self) -> Result<String, OracleError> {
        self.host
            .bundle
            .short_version
            .clone()
            .ok_or(OracleError::NoContext {
                handle: "bundle short version",
            })
    }

    fn app_identifier(&self) -> Option<String> {
        self.host.bundle.bundle_identifier.clone()
    }

    async fn update_signal(&self, target: &LookupTarget) -> Result<UpdateSignal, OracleError> {
        let listing = self.host.store.lookup(target).await?;
        debug!(
            "Store listing: version={:?}, url={:?}",
            listing.version, listing.track_view_url
        );
        Ok(UpdateSignal::Store {
            version: listing.version,
            store_url: listing.track_view_url,
        })
    }

    async fn open_url(&self, url: &str) -> Result<bool, OracleError> {
        let opener = self.host.opener.as_ref().ok_or(OracleError::NoContext {
            handle: "application",
        })?;
        let url = parse_url("open url", url)?;
        Ok(opener.open(url.as_str()).await)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use plex_backend::{
        LookupKey, LookupTarget, OracleError, PlatformProvider, RecommendedType, UpdateQuery,
    };

    use super::IosProvider;
    use crate::host::{BundleInfo, IosHost, SchemeProber, UrlOpener};
    use crate::lookup::{LookupError, StoreListing, StoreLookup};

    struct FakeSchemes(HashSet<&'static str>);

    impl SchemeProber for FakeSchemes {
        fn can_open_url(&self, url: &str) -> bool {
            self.0.contains(url)
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        accepts: HashSet<String>,
        opened: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl UrlOpener for RecordingOpener {
        async fn open(&self, url: &str) -> bool {
            self.opened
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(url.to_string());
            self.accepts.contains(url)
        }
    }

    struct FixedStore(Option<StoreListing>);

    #[async_trait]
    impl StoreLookup for FixedStore {
        async fn lookup(&self, _target: &LookupTarget) -> Result<StoreListing, LookupError> {
            self.0
                .clone()
                .ok_or_else(|| LookupError::InvalidUrl("offline".to_string()))
        }
    }

    fn host(listing: Option<StoreListing>, opener: Arc<RecordingOpener>) -> IosHost {
        IosHost {
            bundle: BundleInfo {
                short_version: Some("1.0.0".to_string()),
                bundle_identifier: Some("com.anuvaya.plex".to_string()),
            },
            scheme_prober: Some(Arc::new(FakeSchemes(HashSet::from(["phonepe://", "tez://"])))),
            opener: Some(opener),
            store: Arc::new(FixedStore(listing)),
        }
    }

    fn listing(version: &str) -> Option<StoreListing> {
        Some(StoreListing {
            version: Some(version.to_string()),
            track_view_url: Some("https://apps.apple.com/in/app/plex/id42".to_string()),
        })
    }

    #[test]
    fn probes_by_url_scheme() {
        let provider = IosProvider::new(host(None, Arc::default()));

        assert_eq!(provider.exists("phonepe"), Ok(true));
        assert_eq!(provider.exists("bhim"), Ok(false));
        assert!(matches!(
            provider.exists("not a scheme"),
            Err(OracleError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn detection_keeps_catalog_order_and_count() {
        let provider = IosProvider::new(host(None, Arc::default()));

        let report = plex_core::detect_installed_apps(&provider);

        assert_eq!(report.total_apps_checked, 23);
        let installed: Vec<_> = report
            .installed_apps
            .iter()
            .filter(|app| app.is_installed)
            .map(|app| app.name.as_str())
            .collect();
        assert_eq!(installed, vec!["Google Pay", "PhonePe"]);
    }

    #[test]
    fn missing_application_disables_probing() {
        let mut host = host(None, Arc::default());
        host.scheme_prober = None;
        let provider = IosProvider::new(host);

        let report = plex_core::detect_installed_apps(&provider);

        assert!(report.installed_apps.is_empty());
        assert_eq!(report.total_apps_checked, 0);
    }

    #[tokio::test]
    async fn newer_listing_recommends_store() {
        let provider = Arc::new(IosProvider::new(host(listing("1.0.1"), Arc::default())));

        let report = plex_core::UpdateResolver::new(provider)
            .check_for_update(&UpdateQuery::default())
            .await;

        assert!(report.is_available);
        assert_eq!(report.recommended_type, RecommendedType::Store);
        assert_eq!(
            report.store_url.as_deref(),
            Some("https://apps.apple.com/in/app/plex/id42")
        );
    }

    #[tokio::test]
    async fn lookup_failure_keeps_local_version() {
        let provider = Arc::new(IosProvider::new(host(None, Arc::default())));

        let report = plex_core::UpdateResolver::new(provider)
            .check_for_update(&UpdateQuery::default())
            .await;

        assert!(!report.is_available);
        assert_eq!(report.recommended_type, RecommendedType::None);
        assert_eq!(report.local_version, "1.0.0");
    }

    #[tokio::test]
    async fn start_falls_back_from_native_scheme_to_web() {
        let opener = Arc::new(RecordingOpener {
            accepts: HashSet::from(["https://apps.apple.com/in/app/plex/id42".to_string()]),
            ..RecordingOpener::default()
        });
        let provider = Arc::new(IosProvider::new(host(listing("2.0"), opener.clone())));

        let result = plex_core::UpdateResolver::new(provider)
            .start_update(&UpdateQuery::default())
            .await;

        assert!(result.started);
        assert_eq!(
            *opener
                .opened
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
            vec![
                "itms-apps://apps.apple.com/in/app/plex/id42".to_string(),
                "https://apps.apple.com/in/app/plex/id42".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn open_without_application_is_no_context() {
        let mut host = host(None, Arc::default());
        host.opener = None;
        let provider = IosProvider::new(host);

        let result = provider.open_url("https://apps.apple.com/app/id1").await;

        assert!(matches!(result, Err(OracleError::NoContext { .. })));
    }

    #[tokio::test]
    async fn lookup_target_is_passed_through() {
        struct CapturingStore(Mutex<Option<LookupTarget>>);

        #[async_trait]
        impl StoreLookup for CapturingStore {
            async fn lookup(&self, target: &LookupTarget) -> Result<StoreListing, LookupError> {
                *self
                    .0
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(target.clone());
                Ok(StoreListing::default())
            }
        }

        let store = Arc::new(CapturingStore(Mutex::new(None)));
        let mut host = host(None, Arc::default());
        host.store = store.clone();
        let provider = IosProvider::new(host);
        let target = LookupTarget {
            key: LookupKey::StoreId("42".to_string()),
            country_code: Some("in".to_string()),
        };

        let _ = provider.update_signal(&target).await;

        assert_eq!(
            *store
                .0
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
            Some(target)
        );
    }
}
