//! Deadline enforcement for calls into the Spanner service.

use crate::error::{SpannerError, SpannerResult};
use std::future::Future;
use std::time::Duration;

/// Await `future`, failing with a timeout error naming `operation` once
/// `timeout` has elapsed.
pub async fn with_timeout<T, F>(operation: &str, timeout: Duration, future: F) -> SpannerResult<T>
where
    F: Future<Output = SpannerResult<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(SpannerError::timeout(operation, timeout.as_secs())),
    }
}
