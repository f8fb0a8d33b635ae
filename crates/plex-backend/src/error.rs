use thiserror::Error;

/// Failure reported by one of the platform oracles.
///
/// None of these ever reach the host: the core collapses every variant into
/// a degraded result (`isInstalled = false`, `isAvailable = false`,
/// `started = false`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Entity not found")]
    NotFound,

    #[error("Oracle unreachable during {operation}: {details}")]
    Unreachable {
        operation: &'static str,
        details: String,
    },

    #[error("Malformed response during {operation}: {details}")]
    MalformedResponse {
        operation: &'static str,
        details: String,
    },

    #[error("Host context unavailable: {handle}")]
    NoContext { handle: &'static str },

    #[error("Operation not supported by this platform: {operation}")]
    Unsupported { operation: &'static str },

    #[error("Timed out after {seconds}s during {operation}")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },
}

impl OracleError {
    pub fn unreachable(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Unreachable {
            operation,
            details: details.into(),
        }
    }

    pub fn unreachable_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::unreachable(operation, error.to_string())
    }

    pub fn malformed(operation: &'static str, details: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation,
            details: details.into(),
        }
    }

    pub fn malformed_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::malformed(operation, error.to_string())
    }

    /// `NotFound` is an answer, not a fault.
    #[must_use]
    pub fn is_expected_absence(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
