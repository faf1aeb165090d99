use uuid::Uuid;

/// Port for the per-actor action rate limit.
///
/// Injectable so single-instance deployments can use an in-process
/// limiter while multi-instance deployments swap in a shared store.
pub trait RateLimiter: Send + Sync {
    /// Try to record one occurrence of `action` for `actor_id`.
    /// Returns false when the actor is over quota for the current window.
    fn try_acquire(&self, actor_id: Uuid, action: &str) -> bool;
}
