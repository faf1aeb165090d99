use crate::domain::models::TaskCategorization;
use async_trait::async_trait;

/// Port for the classification result cache.
///
/// Keys are case-normalized trimmed titles; entries expire a fixed TTL
/// after insertion. Process-lifetime only in the default adapter, but
/// injectable so a shared cache service can back it instead.
#[async_trait]
pub trait ClassificationCache: Send + Sync {
    async fn get(&self, title: &str) -> Option<TaskCategorization>;

    async fn put(&self, title: &str, categorization: TaskCategorization);
}
