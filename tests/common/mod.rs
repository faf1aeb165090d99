//! Common test utilities for integration tests.
//!
//! Provides shared fixtures and test doubles used across multiple
//! integration test files.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use taskwise::adapters::sqlite::{all_embedded_migrations, create_test_pool, Migrator};
use taskwise::adapters::{KeyedRateLimiter, MokaClassificationCache, SqliteTaskRepository, StaticIdentityProvider};
use taskwise::domain::models::{Actor, TaskCategorization};
use taskwise::{TaskClassifier, TaskService};

/// Create an in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    Migrator::new(pool.clone())
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .expect("Failed to run migrations");
    pool
}

/// A classifier double returning a fixed categorization and counting calls.
#[allow(dead_code)]
pub struct MockClassifier {
    response: TaskCategorization,
    calls: AtomicU32,
}

#[allow(dead_code)]
impl MockClassifier {
    pub fn returning(response: TaskCategorization) -> Self {
        Self {
            response,
            calls: AtomicU32::new(0),
        }
    }

    pub fn neutral() -> Self {
        Self::returning(TaskCategorization::neutral())
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskClassifier for MockClassifier {
    async fn classify(&self, _title: &str) -> TaskCategorization {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
    }

    async fn classify_batch(&self, titles: &[String]) -> Vec<TaskCategorization> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        titles.iter().map(|_| self.response).collect()
    }
}

#[allow(dead_code)]
pub fn test_actor() -> Actor {
    Actor {
        id: Uuid::new_v4(),
        email: "tester@example.com".to_string(),
    }
}

/// Service wired against a shared pool for a specific actor.
#[allow(dead_code)]
pub fn service_for(
    pool: &SqlitePool,
    classifier: Arc<MockClassifier>,
    actor: Option<Actor>,
) -> TaskService<SqliteTaskRepository, MockClassifier> {
    let identity = match actor {
        Some(actor) => StaticIdentityProvider::new(actor),
        None => StaticIdentityProvider::anonymous(),
    };
    TaskService::new(
        Arc::new(SqliteTaskRepository::new(pool.clone())),
        classifier,
        Arc::new(identity),
        Arc::new(MokaClassificationCache::with_ttl(
            Duration::from_secs(3600),
            64,
        )),
        Arc::new(KeyedRateLimiter::new(10, 60)),
    )
}
