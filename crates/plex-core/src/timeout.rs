use std::future::Future;
use std::time::Duration;

use plex_backend::OracleError;

/// Await an oracle call, turning a hang into `OracleError::Timeout`.
pub(crate) async fn with_timeout<T, F>(
    timeout: Duration,
    operation: &'static str,
    future: F,
) -> Result<T, OracleError>
where
    F: Future<Output = Result<T, OracleError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(OracleError::Timeout {
            operation,
            seconds: timeout.as_secs(),
        }),
    }
}
