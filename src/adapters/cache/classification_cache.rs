//! Moka-backed TTL cache for classification results.
//!
//! Keys are case-normalized trimmed titles, so repeated creations of the
//! same title within the validity window skip the external call. Entries
//! live for a fixed TTL from insertion and expire lazily. Process-lifetime
//! only.

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use crate::domain::models::TaskCategorization;
use crate::domain::ports::ClassificationCache;

/// Default TTL for cached classifications.
const CLASSIFICATION_CACHE_TTL_SECS: u64 = 3600;

/// Maximum number of cached entries.
const CLASSIFICATION_CACHE_MAX_CAPACITY: u64 = 1024;

pub struct MokaClassificationCache {
    cache: Cache<String, TaskCategorization>,
}

impl MokaClassificationCache {
    /// Create a cache with the default one-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(
            Duration::from_secs(CLASSIFICATION_CACHE_TTL_SECS),
            CLASSIFICATION_CACHE_MAX_CAPACITY,
        )
    }

    /// Create with custom TTL and capacity.
    pub fn with_ttl(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    fn normalize_key(title: &str) -> String {
        title.trim().to_lowercase()
    }
}

impl Default for MokaClassificationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClassificationCache for MokaClassificationCache {
    async fn get(&self, title: &str) -> Option<TaskCategorization> {
        self.cache.get(&Self::normalize_key(title)).await
    }

    async fn put(&self, title: &str, categorization: TaskCategorization) {
        self.cache
            .insert(Self::normalize_key(title), categorization)
            .await;
    }
}
