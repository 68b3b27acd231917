//! Time bound applied to every repository call.

use std::future::Future;
use std::time::Duration;

use entry_core::AppError;
use entry_core::result::AppResult;

/// Run `query`, failing with a timeout error if it has not finished
/// within `limit`. The pending query is dropped on expiry, which returns
/// its connection to the pool.
pub async fn bounded<T, F>(limit: Duration, operation: &'static str, query: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_ms = limit.as_millis() as u64, "Query timed out");
            Err(AppError::timeout(format!(
                "{operation} did not complete within {}ms",
                limit.as_millis()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entry_core::error::ErrorKind;

    #[tokio::test(start_paused = true)]
    async fn test_expired_query_is_timeout() {
        let err = bounded(Duration::from_secs(3), "get entry", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, AppError>(())
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_result_passes_through() {
        let value = bounded(Duration::from_secs(3), "get entry", async { Ok(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);

        let err = bounded(Duration::from_secs(3), "get entry", async {
            Err::<(), _>(AppError::not_found("missing"))
        })
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
