//! Token bucket rate limiter for classification API requests.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Token bucket rate limiter.
///
/// Tokens refill continuously based on elapsed time; capacity equals the
/// refill rate, so a full second of quota can be spent as a burst.
pub struct TokenBucketRateLimiter {
    /// Current number of tokens
    tokens: Arc<Mutex<f64>>,
    /// Maximum number of tokens (burst capacity)
    capacity: f64,
    /// Tokens added per second
    refill_rate: f64,
    /// Last time tokens were refilled
    last_refill: Arc<Mutex<Instant>>,
}

impl TokenBucketRateLimiter {
    /// Create a new rate limiter allowing `requests_per_second` sustained
    /// requests per second.
    pub fn new(requests_per_second: f64) -> Self {
        assert!(
            requests_per_second > 0.0,
            "requests_per_second must be positive"
        );

        Self {
            tokens: Arc::new(Mutex::new(requests_per_second)),
            capacity: requests_per_second,
            refill_rate: requests_per_second,
            last_refill: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Acquire a token, waiting if necessary.
    pub async fn acquire(&self) {
        loop {
            let mut tokens = self.tokens.lock().await;
            let mut last_refill = self.last_refill.lock().await;

            let now = Instant::now();
            let elapsed = now.duration_since(*last_refill).as_secs_f64();
            let new_tokens = (*tokens + elapsed * self.refill_rate).min(self.capacity);

            if new_tokens >= 1.0 {
                *tokens = new_tokens - 1.0;
                *last_refill = now;
                return;
            }

            let tokens_needed = 1.0 - new_tokens;
            let wait_time_secs = tokens_needed / self.refill_rate;
            let wait_duration = Duration::from_secs_f64(wait_time_secs.max(0.01));

            // Release locks before sleeping
            drop(tokens);
            drop(last_refill);

            sleep(wait_duration).await;
        }
    }

    /// Current number of available tokens (for testing/monitoring).
    pub async fn available_tokens(&self) -> f64 {
        let tokens = self.tokens.lock().await;
        let last_refill = self.last_refill.lock().await;

        let now = Instant::now();
        let elapsed = now.duration_since(*last_refill).as_secs_f64();
        (*tokens + elapsed * self.refill_rate).min(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_up_to_capacity() {
        let limiter = TokenBucketRateLimiter::new(5.0);

        for _ in 0..5 {
            let start = Instant::now();
            limiter.acquire().await;
            assert!(
                start.elapsed() < Duration::from_millis(50),
                "burst should be immediate"
            );
        }
    }

    #[tokio::test]
    async fn test_enforces_delay_when_depleted() {
        let limiter = TokenBucketRateLimiter::new(2.0);

        limiter.acquire().await;
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        let elapsed = start.elapsed();

        assert!(
            elapsed >= Duration::from_millis(400),
            "expected ~0.5s delay, got {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_refills_over_time() {
        let limiter = TokenBucketRateLimiter::new(10.0);

        for _ in 0..10 {
            limiter.acquire().await;
        }
        assert!(limiter.available_tokens().await < 1.0);

        sleep(Duration::from_millis(500)).await;

        let tokens = limiter.available_tokens().await;
        assert!(
            (4.0..=6.0).contains(&tokens),
            "expected ~5 tokens after 0.5s, got {tokens}"
        );
    }

    #[tokio::test]
    async fn test_tokens_capped_at_capacity() {
        let limiter = TokenBucketRateLimiter::new(5.0);
        sleep(Duration::from_millis(300)).await;
        assert!(limiter.available_tokens().await <= 5.0);
    }
}
