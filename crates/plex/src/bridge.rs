use std::sync::Arc;

use log::{debug, info, warn};
use plex_backend::{
    DetectionReport, Platform, PlatformProvider, StartResult, UpdateQuery, UpdateReport,
};
use plex_core::{UpdateResolver, detect_installed_apps};
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::host_platform::HostPlatform;
use crate::logging::{apply_log_level, init_logging};
use crate::paths::AppPaths;
use crate::settings::BridgeSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BridgeMethod {
    GetPaymentContext,
    CheckForUpdate,
    StartUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeRequest {
    pub method: BridgeMethod,
    #[serde(default, deserialize_with = "plex_backend::lenient::option")]
    pub options: Option<UpdateQuery>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// The three operations exposed to the embedding app.
pub struct Bridge {
    provider: Arc<dyn PlatformProvider>,
    resolver: UpdateResolver,
    settings: BridgeSettings,
}

impl Bridge {
    #[must_use]
    pub fn new(host: HostPlatform, settings: BridgeSettings) -> Self {
        Self::from_provider(host.into_provider(), settings)
    }

    #[must_use]
    pub fn from_provider(provider: Arc<dyn PlatformProvider>, settings: BridgeSettings) -> Self {
        let resolver =
            UpdateResolver::new(Arc::clone(&provider)).with_timeout(settings.oracle_timeout());
        Self {
            provider,
            resolver,
            settings,
        }
    }

    /// Load settings from `paths`, start logging, and build the bridge.
    #[must_use]
    pub fn bootstrap(host: HostPlatform, paths: &AppPaths) -> Self {
        let settings = BridgeSettings::load(paths);
        init_logging(paths, &settings);
        info!(
            "Plex bridge starting on {} (oracle timeout {}s)",
            host.kind(),
            settings.oracle_timeout_secs
        );
        Self::new(host, settings)
    }

    /// [`Bridge::bootstrap`] against the per-user config and data directories.
    ///
    /// # Errors
    /// Returns an error when the user directories cannot be determined.
    pub fn bootstrap_in_user_dirs(host: HostPlatform) -> Result<Self, BridgeError> {
        let paths = AppPaths::new()?;
        Ok(Self::bootstrap(host, &paths))
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.provider.platform()
    }

    #[must_use]
    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// Toggle debug output for the running bridge without reloading settings.
    pub fn set_debug_logging(&mut self, enabled: bool) {
        self.settings.debug_logging = enabled;
        apply_log_level(&self.settings);
    }

    #[must_use]
    pub fn get_payment_context(&self) -> DetectionReport {
        let report = detect_installed_apps(self.provider.as_ref());
        debug!(
            "Payment context: {} of {} apps installed",
            report
                .installed_apps
                .iter()
                .filter(|app| app.is_installed)
                .count(),
            report.total_apps_checked
        );
        report
    }

    pub async fn check_for_update(&self, query: Option<UpdateQuery>) -> UpdateReport {
        let query = self.settings.apply_defaults(query.unwrap_or_default());
        self.resolver.check_for_update(&query).await
    }

    pub async fn start_update(&self, query: Option<UpdateQuery>) -> StartResult {
        let query = self.settings.apply_defaults(query.unwrap_or_default());
        self.resolver.start_update(&query).await
    }

    /// Dispatch one JSON request and return the JSON response.
    ///
    /// Malformed requests are answered with `{"error": "..."}`.
    pub async fn handle_json(&self, request: &str) -> String {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!("Bridge request rejected: {error}");
                error_response(&error)
            }
        }
    }

    async fn dispatch(&self, request: &str) -> Result<String, BridgeError> {
        let request: BridgeRequest =
            serde_json::from_str(request).map_err(BridgeError::InvalidRequest)?;
        debug!("Bridge request: {:?}", request.method);

        match request.method {
            BridgeMethod::GetPaymentContext => encode(&self.get_payment_context()),
            BridgeMethod::CheckForUpdate => encode(&self.check_for_update(request.options).await),
            BridgeMethod::StartUpdate => encode(&self.start_update(request.options).await),
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, BridgeError> {
    serde_json::to_string(value).map_err(BridgeError::Encode)
}

fn error_response(error: &BridgeError) -> String {
    let body = ErrorResponse {
        error: error.to_string(),
    };
    serde_json::to_string(&body)
        .unwrap_or_else(|_| String::from(r#"{"error":"internal encoding failure"}"#))
}
