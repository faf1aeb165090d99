//! Governor-backed per-actor rate limiting.
//!
//! Keys combine actor id and action name, mirroring the injectable-store
//! requirement: single-instance deployments use this in-process limiter,
//! multi-instance deployments swap the port for a shared store.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultKeyedRateLimiter, Quota};
use uuid::Uuid;

use crate::domain::models::RateLimitConfig;
use crate::domain::ports::RateLimiter;

pub struct KeyedRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl KeyedRateLimiter {
    /// Create a limiter allowing `max_requests` per `window_secs` rolling
    /// window per key, with the full quota available as an initial burst.
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        let max = NonZeroU32::new(max_requests.max(1)).expect("non-zero after max(1)");
        let replenish_period =
            Duration::from_secs_f64(window_secs.max(1) as f64 / f64::from(max.get()));
        let quota = Quota::with_period(replenish_period)
            .expect("period is non-zero")
            .allow_burst(max);

        Self {
            limiter: DefaultKeyedRateLimiter::keyed(quota),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window_secs)
    }
}

impl RateLimiter for KeyedRateLimiter {
    fn try_acquire(&self, actor_id: Uuid, action: &str) -> bool {
        let key = format!("{actor_id}:{action}");
        self.limiter.check_key(&key).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_quota_then_rejects() {
        let limiter = KeyedRateLimiter::new(10, 60);
        let actor = Uuid::new_v4();

        for i in 0..10 {
            assert!(
                limiter.try_acquire(actor, "create_task"),
                "request {} should be within quota",
                i + 1
            );
        }
        assert!(
            !limiter.try_acquire(actor, "create_task"),
            "11th request should be rejected"
        );
    }

    #[test]
    fn test_keys_are_isolated_per_actor() {
        let limiter = KeyedRateLimiter::new(2, 60);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert!(limiter.try_acquire(first, "create_task"));
        assert!(limiter.try_acquire(first, "create_task"));
        assert!(!limiter.try_acquire(first, "create_task"));

        // A different actor has its own quota
        assert!(limiter.try_acquire(second, "create_task"));
    }

    #[test]
    fn test_keys_are_isolated_per_action() {
        let limiter = KeyedRateLimiter::new(1, 60);
        let actor = Uuid::new_v4();

        assert!(limiter.try_acquire(actor, "create_task"));
        assert!(!limiter.try_acquire(actor, "create_task"));
        assert!(limiter.try_acquire(actor, "other_action"));
    }
}
