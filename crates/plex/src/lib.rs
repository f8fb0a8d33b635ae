//! Host boundary for the payment-context and app-update bridge.
//!
//! Selects the platform provider once at startup and exposes
//! `getPaymentContext`, `checkForUpdate` and `startUpdate`, both as typed
//! async methods and through a JSON request/response entry point.

mod bridge;
mod error;
mod host_platform;
mod logging;
mod paths;
mod settings;

pub use bridge::{Bridge, BridgeMethod, BridgeRequest};
pub use error::BridgeError;
pub use host_platform::{HostPlatform, itunes_store};
pub use logging::{apply_log_level, init_logging, level_for};
pub use paths::{AppPaths, AppPathsError};
pub use settings::{BridgeSettings, SettingsError};

pub use plex_backend::{
    DetectionReport, Platform, ProbeResult, RecommendedType, StartResult, UpdateKind,
    UpdateQuery, UpdateReport,
};
