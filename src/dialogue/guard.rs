// src/dialogue/guard.rs — Time limits around backend calls
//
// A backend that does not answer in time surfaces as `BackendUnavailable`.
// The caller has not mutated anything yet, so the session stays as it was.

use std::future::Future;
use std::time::Duration;

use crate::infra::errors::CoachError;

/// Await `fut`, giving up after `limit`.
pub async fn bounded<T, F>(backend: &str, limit: Duration, fut: F) -> Result<T, CoachError>
where
    F: Future<Output = Result<T, CoachError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Backend '{}' timed out after {:?}", backend, limit);
            Err(CoachError::BackendUnavailable {
                backend: backend.to_string(),
                message: format!("no answer within {}ms", limit.as_millis()),
            })
        }
    }
}
