use crate::error::ApiError;
use backoff::{ExponentialBackoff, backoff::Backoff};
use std::future::Future;
use std::time::Duration;

/// Retry configuration for API queries
///
/// The agent hub is retried on a fixed interval, not an exponential
/// schedule; the interval is drawn from a `backoff` policy pinned to
/// multiplier 1.0.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first call included
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Config for tests and local mock servers (short delays)
    pub fn quick() -> Self {
        Self {
            max_attempts: 4,
            delay: Duration::from_millis(10),
        }
    }
}

/// Retry executor for API queries
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Execute an async operation, retrying retryable failures up to the
    /// attempt cap with a fixed inter-attempt delay. The last error is
    /// returned once the cap is reached.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut backoff = ExponentialBackoff {
            initial_interval: self.config.delay,
            max_interval: self.config.delay,
            multiplier: 1.0,
            randomization_factor: 0.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !self.should_retry(&error, attempt) {
                        return Err(error);
                    }

                    tracing::warn!(attempt, error = %error, "API query failed, retrying");

                    if let Some(delay) = backoff.next_backoff() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }

    fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        if attempt >= self.config.max_attempts {
            return false;
        }
        error.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn failing_status(status: u16) -> ApiError {
        ApiError::Http {
            status,
            endpoint: "/test".to_string(),
            message: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn test_retry_success_immediate() {
        let executor = RetryExecutor::new(RetryConfig::quick());

        let result = executor.execute(|| async { Ok::<i32, ApiError>(42) }).await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_retry_makes_exactly_four_attempts_then_fails() {
        let executor = RetryExecutor::new(RetryConfig::quick());
        let calls = AtomicU32::new(0);

        let result: Result<(), ApiError> = executor
            .execute(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(failing_status(503))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_retry_stops_after_success() {
        let executor = RetryExecutor::new(RetryConfig::quick());
        let calls = AtomicU32::new(0);

        let result = executor
            .execute(|| async {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt <= 2 {
                    Err(failing_status(500))
                } else {
                    Ok("body".to_string())
                }
            })
            .await;

        assert_eq!(result.unwrap(), "body");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_on_schema_error() {
        let executor = RetryExecutor::new(RetryConfig::quick());
        let calls = AtomicU32::new(0);

        let result: Result<(), ApiError> = executor
            .execute(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Schema {
                    endpoint: "/test".to_string(),
                    message: "missing field".to_string(),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_config_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.delay, Duration::from_secs(2));

        let quick = RetryConfig::quick();
        assert_eq!(quick.max_attempts, 4);
        assert_eq!(quick.delay, Duration::from_millis(10));
    }
}
