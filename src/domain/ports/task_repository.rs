use crate::domain::errors::DomainResult;
use crate::domain::models::{PriorityLevel, Task, TaskStatus};
use async_trait::async_trait;
use uuid::Uuid;

/// Filters for querying an actor's tasks
#[derive(Default, Debug, Clone)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub priority: Option<PriorityLevel>,
    pub limit: Option<i64>,
}

/// Repository port for task persistence.
///
/// Every read and mutation is scoped by owner in the statement itself;
/// an id belonging to another owner behaves exactly like a missing row.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task and return the persisted row
    async fn insert(&self, task: &Task) -> DomainResult<Task>;

    /// Get a task by id, scoped to its owner
    async fn get(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Task>>;

    /// Update an existing owned task and return the persisted row.
    /// Fails with `NotFound` when no matching owned row exists.
    async fn update(&self, task: &Task) -> DomainResult<Task>;

    /// Delete an owned task. Fails with `NotFound` when no matching
    /// owned row exists (repeated deletes are not idempotent).
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> DomainResult<()>;

    /// List the owner's tasks, newest-created-first, with optional filters
    async fn list(&self, owner_id: Uuid, filters: TaskFilters) -> DomainResult<Vec<Task>>;
}
