use std::path::Path;
use std::time::Duration;

use log::warn;
use plex_backend::UpdateQuery;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::AppPaths;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSettings {
    #[serde(default = "default_oracle_timeout")]
    pub oracle_timeout_secs: u64,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Used when a query carries no `countryCode`.
    #[serde(default)]
    pub default_country_code: Option<String>,

    /// Used when a query names neither `appStoreId` nor `bundleId`.
    #[serde(default)]
    pub app_store_id: Option<String>,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_oracle_timeout() -> u64 {
    15
}

fn default_http_timeout() -> u64 {
    10
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            oracle_timeout_secs: default_oracle_timeout(),
            http_timeout_secs: default_http_timeout(),
            default_country_code: None,
            app_store_id: None,
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl BridgeSettings {
    #[must_use]
    pub fn load(paths: &AppPaths) -> Self {
        Self::load_from(&paths.settings_file())
    }

    /// Missing or unreadable settings fall back to defaults.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|error| {
                warn!("Ignoring corrupt settings at {}: {error}", path.display());
                Self::default()
            }),
            Err(error) => {
                warn!("Failed to read settings at {}: {error}", path.display());
                Self::default()
            }
        }
    }

    /// # Errors
    /// Returns an error when the settings directory or file cannot be written.
    pub fn save(&self, paths: &AppPaths) -> Result<(), SettingsError> {
        paths.ensure_dirs()?;

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), content)?;
        Ok(())
    }

    /// Zero reads as the default.
    #[must_use]
    pub fn oracle_timeout(&self) -> Duration {
        non_zero_secs(self.oracle_timeout_secs, default_oracle_timeout())
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        non_zero_secs(self.http_timeout_secs, default_http_timeout())
    }

    /// Fill the query's unset (or empty) fields from settings.
    ///
    /// The configured store id only applies when the query names no app.
    #[must_use]
    pub fn apply_defaults(&self, mut query: UpdateQuery) -> UpdateQuery {
        if query.app_store_id().is_none() && query.bundle_id().is_none() {
            query.app_store_id.clone_from(&self.app_store_id);
        }
        if query.country_code().is_none() {
            query.country_code.clone_from(&self.default_country_code);
        }
        query
    }
}

fn non_zero_secs(secs: u64, fallback: u64) -> Duration {
    Duration::from_secs(if secs == 0 { fallback } else { secs })
}
