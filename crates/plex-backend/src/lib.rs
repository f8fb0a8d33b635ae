mod error;
pub mod lenient;
mod traits;
mod types;

pub use error::OracleError;
pub use traits::PlatformProvider;
pub use types::{
    CatalogEntry, DetectionMethod, DetectionReport, InstallStateSubscription, InstallStatus,
    LookupKey, LookupTarget, PermittedKinds, Platform, ProbeResult, RecommendedType,
    RemoteVersion, StartResult, SubscriptionId, UpdateKind, UpdateQuery, UpdateReport,
    UpdateSignal,
};
