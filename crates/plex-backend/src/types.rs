use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How installation presence is established on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Lookup in the installed-package registry.
    PackageManager,
    /// "Can this URL scheme be opened" probing.
    UrlScheme,
}

/// One entry of a fixed payment-app catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub identifier: &'static str,
    pub display_name: &'static str,
    pub url_scheme: &'static str,
}

impl CatalogEntry {
    #[must_use]
    pub const fn new(
        identifier: &'static str,
        display_name: &'static str,
        url_scheme: &'static str,
    ) -> Self {
        Self {
            identifier,
            display_name,
            url_scheme,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub scheme: String,
    pub name: String,
    pub is_installed: bool,
    pub package_name: String,
}

impl ProbeResult {
    #[must_use]
    pub fn from_entry(entry: &CatalogEntry, is_installed: bool) -> Self {
        Self {
            scheme: entry.url_scheme.to_string(),
            name: entry.display_name.to_string(),
            is_installed,
            package_name: entry.identifier.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub installed_apps: Vec<ProbeResult>,
    pub total_apps_checked: usize,
    pub detection_method: DetectionMethod,
}

impl DetectionReport {
    #[must_use]
    pub fn new(installed_apps: Vec<ProbeResult>, detection_method: DetectionMethod) -> Self {
        Self {
            total_apps_checked: installed_apps.len(),
            installed_apps,
            detection_method,
        }
    }

    /// Report for a host with no registry context: nothing was probed.
    #[must_use]
    pub fn not_probed(detection_method: DetectionMethod) -> Self {
        Self::new(Vec::new(), detection_method)
    }
}

/// In-app update flow kinds a caller may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Immediate,
    Flexible,
}

impl UpdateKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Flexible => "flexible",
        }
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedType {
    Immediate,
    Flexible,
    Store,
    #[default]
    None,
}

impl From<UpdateKind> for RecommendedType {
    fn from(kind: UpdateKind) -> Self {
        match kind {
            UpdateKind::Immediate => Self::Immediate,
            UpdateKind::Flexible => Self::Flexible,
        }
    }
}

/// Update kinds the platform update manager allows for the pending update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermittedKinds {
    pub immediate: bool,
    pub flexible: bool,
}

impl PermittedKinds {
    #[must_use]
    pub const fn permits(self, kind: UpdateKind) -> bool {
        match kind {
            UpdateKind::Immediate => self.immediate,
            UpdateKind::Flexible => self.flexible,
        }
    }
}

/// A remote version is either a dotted version name or a platform version code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteVersion {
    Code(i64),
    Name(String),
}

/// Optional overrides supplied by the host for update checks and starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuery {
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub app_store_id: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub bundle_id: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub country_code: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "crate::lenient::option")]
    pub preferred_kind: Option<UpdateKind>,
}

impl UpdateQuery {
    #[must_use]
    pub fn app_store_id(&self) -> Option<&str> {
        non_empty(self.app_store_id.as_deref())
    }

    #[must_use]
    pub fn bundle_id(&self) -> Option<&str> {
        non_empty(self.bundle_id.as_deref())
    }

    #[must_use]
    pub fn country_code(&self) -> Option<&str> {
        non_empty(self.country_code.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub platform: Platform,
    pub is_available: bool,
    pub recommended_type: RecommendedType,
    pub local_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_version: Option<RemoteVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
}

impl UpdateReport {
    #[must_use]
    pub fn unavailable(platform: Platform, local_version: impl Into<String>) -> Self {
        Self {
            platform,
            is_available: false,
            recommended_type: RecommendedType::None,
            local_version: local_version.into(),
            remote_version: None,
            store_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartResult {
    pub started: bool,
}

impl StartResult {
    pub const NOT_STARTED: Self = Self { started: false };
}

impl From<bool> for StartResult {
    fn from(started: bool) -> Self {
        Self { started }
    }
}

/// What the update oracle is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    StoreId(String),
    BundleId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTarget {
    pub key: LookupKey,
    pub country_code: Option<String>,
}

/// Raw answer of a platform update oracle, before any decision is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateSignal {
    /// The platform update manager decides availability itself.
    Managed {
        available: bool,
        permitted: PermittedKinds,
        version_code: Option<i64>,
    },
    /// A store listing that has to be compared against the local version.
    Store {
        version: Option<String>,
        store_url: Option<String>,
    },
}

/// Install progress of a background (flexible) update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallStatus {
    Unknown,
    Pending,
    Downloading,
    Downloaded,
    Installing,
    Installed,
    Failed,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A registered install-state listener and the stream it is fed through.
#[derive(Debug)]
pub struct InstallStateSubscription {
    pub id: SubscriptionId,
    pub states: mpsc::UnboundedReceiver<InstallStatus>,
}
