use std::future::Future;
use std::time::Duration;

use anyhow::{Context, anyhow};

/// Await a store call, failing with an error instead of hanging past `limit`.
///
/// `what` names the call in the error chain, e.g. `"insert course"`.
pub async fn with_deadline<T, E, F>(limit: Duration, what: &'static str, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.context(what),
        Err(_) => Err(anyhow!("{what}: timed out after {}ms", limit.as_millis())),
    }
}
