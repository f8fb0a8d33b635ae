use plex_ios::LookupError;
use thiserror::Error;

use crate::paths::AppPathsError;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid bridge request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("failed to encode bridge response: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Paths(#[from] AppPathsError),

    #[error(transparent)]
    StoreClient(#[from] LookupError),
}
