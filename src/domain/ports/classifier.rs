use crate::domain::models::TaskCategorization;
use async_trait::async_trait;

/// Port for the external impact/effort classification capability.
///
/// Classification is best-effort: implementations absorb every failure
/// into the Medium/Medium fallback, so these methods are infallible and
/// callers cannot distinguish a real Medium/Medium from a degraded one.
#[async_trait]
pub trait TaskClassifier: Send + Sync {
    /// Classify a single task title
    async fn classify(&self, title: &str) -> TaskCategorization;

    /// Classify a batch of titles in one call. The returned vector always
    /// has the same length as `titles`.
    async fn classify_batch(&self, titles: &[String]) -> Vec<TaskCategorization>;
}
