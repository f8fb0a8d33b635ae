use plex_backend::OracleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AndroidError {
    #[error("Package not found: {0}")]
    NameNotFound(String),

    #[error("No application context available")]
    NoContext,

    #[error("No foreground activity available")]
    NoActivity,

    #[error("Update manager error: {0}")]
    UpdateManager(String),

    #[error("Package manager error: {0}")]
    PackageManager(String),
}

impl From<AndroidError> for OracleError {
    fn from(err: AndroidError) -> Self {
        match err {
            AndroidError::NameNotFound(_) => OracleError::NotFound,
            AndroidError::NoContext => OracleError::NoContext {
                handle: "application context",
            },
            AndroidError::NoActivity => OracleError::NoContext {
                handle: "foreground activity",
            },
            AndroidError::UpdateManager(details) => {
                OracleError::unreachable("app update manager", details)
            }
            AndroidError::PackageManager(details) => {
                OracleError::unreachable("package manager", details)
            }
        }
    }
}
