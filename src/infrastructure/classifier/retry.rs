//! Retry policy with exponential backoff for classification API requests.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::errors::ClassifierApiError;
use crate::domain::models::RetryConfig;

/// Retry policy with exponential backoff.
///
/// Backoff doubles with each retry, capped at `max_backoff_ms`. Only
/// transient errors (rate limit, 5xx, overload, timeout) are retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_backoff_ms,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            config.initial_backoff_ms,
            config.max_backoff_ms,
        )
    }

    /// Execute an operation with retry on transient errors.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, ClassifierApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClassifierApiError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!("operation succeeded after {attempt} retries");
                    }
                    return Ok(result);
                }
                Err(err) => {
                    if !self.should_retry(&err, attempt) {
                        return Err(err);
                    }

                    let backoff = self.calculate_backoff(attempt);
                    warn!(
                        "attempt {} failed with transient error: {err}. Retrying in {backoff:?}",
                        attempt + 1
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// min(initial_backoff * 2^attempt, max_backoff)
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let backoff_ms = self
            .initial_backoff_ms
            .saturating_mul(2_u64.saturating_pow(attempt))
            .min(self.max_backoff_ms);
        Duration::from_millis(backoff_ms)
    }

    fn should_retry(&self, error: &ClassifierApiError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
