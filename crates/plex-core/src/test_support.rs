use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use plex_backend::{
    CatalogEntry, DetectionMethod, InstallStateSubscription, InstallStatus, LookupTarget,
    OracleError, Platform, PlatformProvider, SubscriptionId, UpdateKind, UpdateSignal,
};
use tokio::sync::mpsc;

pub(crate) const TWO_APP_CATALOG: &[CatalogEntry] = &[
    CatalogEntry::new("p1", "App1", "tok1"),
    CatalogEntry::new("p2", "App2", "tok2"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Exists(String),
    UpdateSignal(LookupTarget),
    OpenUrl(String),
    TriggerNativeFlow(UpdateKind),
    Subscribe,
    Unsubscribe(SubscriptionId),
    CompleteUpdate,
}

pub(crate) struct MockProvider {
    pub platform: Platform,
    pub method: DetectionMethod,
    pub catalog: &'static [CatalogEntry],
    pub can_probe: bool,
    pub installed: HashMap<&'static str, Result<bool, OracleError>>,
    pub local_version: Result<String, OracleError>,
    pub app_identifier: Option<String>,
    pub signal: Result<UpdateSignal, OracleError>,
    pub signal_delay: Option<Duration>,
    pub open_results: HashMap<String, Result<bool, OracleError>>,
    pub native_flow: Result<bool, OracleError>,
    pub subscribe_fails: bool,
    pub calls: Mutex<Vec<Call>>,
    pub state_sender: Mutex<Option<mpsc::UnboundedSender<InstallStatus>>>,
}

impl MockProvider {
    pub(crate) fn android(signal: Result<UpdateSignal, OracleError>) -> Self {
        Self {
            platform: Platform::Android,
            method: DetectionMethod::PackageManager,
            catalog: TWO_APP_CATALOG,
            can_probe: true,
            installed: HashMap::new(),
            local_version: Ok("1.0.0".to_string()),
            app_identifier: Some("com.example.host".to_string()),
            signal,
            signal_delay: None,
            open_results: HashMap::new(),
            native_flow: Ok(true),
            subscribe_fails: false,
            calls: Mutex::new(Vec::new()),
            state_sender: Mutex::new(None),
        }
    }

    pub(crate) fn ios(signal: Result<UpdateSignal, OracleError>) -> Self {
        Self {
            platform: Platform::Ios,
            method: DetectionMethod::UrlScheme,
            ..Self::android(signal)
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn push_state(&self, status: InstallStatus) {
        let guard = self
            .state_sender
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sender) = guard.as_ref() {
            let _ = sender.send(status);
        }
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl PlatformProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn platform(&self) -> Platform {
        self.platform
    }

    fn detection_method(&self) -> DetectionMethod {
        self.method
    }

    fn catalog(&self) -> &[CatalogEntry] {
        self.catalog
    }

    fn probe_token<'a>(&self, entry: &'a CatalogEntry) -> &'a str {
        entry.url_scheme
    }

    fn can_probe(&self) -> bool {
        self.can_probe
    }

    fn exists(&self, probe_token: &str) -> Result<bool, OracleError> {
        self.record(Call::Exists(probe_token.to_string()));
        self.installed
            .get(probe_token)
            .cloned()
            .unwrap_or(Err(OracleError::NotFound))
    }

    fn local_version(&self) -> Result<String, OracleError> {
        self.local_version.clone()
    }

    fn app_identifier(&self) -> Option<String> {
        self.app_identifier.clone()
    }

    async fn update_signal(&self, target: &LookupTarget) -> Result<UpdateSignal, OracleError> {
        self.record(Call::UpdateSignal(target.clone()));
        if let Some(delay) = self.signal_delay {
            tokio::time::sleep(delay).await;
        }
        self.signal.clone()
    }

    async fn open_url(&self, url: &str) -> Result<bool, OracleError> {
        self.record(Call::OpenUrl(url.to_string()));
        self.open_results.get(url).cloned().unwrap_or(Ok(false))
    }

    async fn trigger_native_flow(&self, kind: UpdateKind) -> Result<bool, OracleError> {
        self.record(Call::TriggerNativeFlow(kind));
        self.native_flow.clone()
    }

    fn subscribe_install_state(&self) -> Result<InstallStateSubscription, OracleError> {
        self.record(Call::Subscribe);
        if self.subscribe_fails {
            return Err(OracleError::NoContext {
                handle: "update manager",
            });
        }
        let (sender, states) = mpsc::unbounded_channel();
        *self
            .state_sender
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(sender);
        Ok(InstallStateSubscription {
            id: SubscriptionId(7),
            states,
        })
    }

    fn unsubscribe_install_state(&self, id: SubscriptionId) {
        self.record(Call::Unsubscribe(id));
        self.state_sender
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
    }

    async fn complete_update(&self) -> Result<(), OracleError> {
        self.record(Call::CompleteUpdate);
        Ok(())
    }
}
