//! Task record service: validation, classification, scoring, and
//! owner-scoped persistence.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Actor, CreateTaskInput, Task, TaskCategorization, UpdateTaskInput};
use crate::domain::ports::{
    ClassificationCache, IdentityProvider, RateLimiter, TaskClassifier, TaskFilters,
    TaskRepository,
};
use crate::services::priority_scoring::{calculate_priority_score, score_to_priority_level};
use crate::services::validation::{sanitize_input, validate_task_input};

/// Rate-limit action key for task creation.
const CREATE_TASK_ACTION: &str = "create_task";

pub struct TaskService<R: TaskRepository, C: TaskClassifier> {
    repo: Arc<R>,
    classifier: Arc<C>,
    identity: Arc<dyn IdentityProvider>,
    cache: Arc<dyn ClassificationCache>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl<R: TaskRepository, C: TaskClassifier> TaskService<R, C> {
    pub fn new(
        repo: Arc<R>,
        classifier: Arc<C>,
        identity: Arc<dyn IdentityProvider>,
        cache: Arc<dyn ClassificationCache>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            repo,
            classifier,
            identity,
            cache,
            rate_limiter,
        }
    }

    async fn require_actor(&self) -> DomainResult<Actor> {
        self.identity
            .current_actor()
            .await
            .ok_or(DomainError::AuthRequired)
    }

    /// Resolve a categorization through the cache, falling back to the
    /// classifier gateway on a miss.
    async fn resolve_categorization(&self, title: &str) -> TaskCategorization {
        if let Some(cached) = self.cache.get(title).await {
            debug!(title, "classification cache hit");
            return cached;
        }

        let categorization = self.classifier.classify(title).await;
        self.cache.put(title, categorization).await;
        categorization
    }

    /// Create a task for the current actor.
    ///
    /// The persisted `priority` is the AI-derived label; the caller's
    /// requested priority only feeds the score multiplier.
    pub async fn create_task(&self, input: CreateTaskInput) -> DomainResult<Task> {
        let actor = self.require_actor().await?;

        if !self.rate_limiter.try_acquire(actor.id, CREATE_TASK_ACTION) {
            return Err(DomainError::RateLimited);
        }

        let title = sanitize_input(&input.title);
        let description = input
            .description
            .as_deref()
            .map(sanitize_input)
            .filter(|d| !d.is_empty());
        validate_task_input(&title, description.as_deref())?;

        let categorization = self.resolve_categorization(&title).await;

        let today = Utc::now().date_naive();
        let result = calculate_priority_score(
            Some(&categorization),
            input.priority,
            input.due_date,
            today,
        );

        let mut task = Task::new(actor.id, title)
            .with_description(description)
            .with_due_date(input.due_date);
        task.priority = score_to_priority_level(result.score);
        task.ai_priority_score = result.score;
        task.ai_reasoning = result.reasoning;

        let task = self.repo.insert(&task).await?;
        info!(
            task_id = %task.id,
            score = task.ai_priority_score,
            priority = task.priority.as_str(),
            "task created"
        );
        Ok(task)
    }

    /// Apply a partial update to an owned task.
    ///
    /// Score and reasoning are left as computed at creation time.
    pub async fn update_task(&self, id: Uuid, changes: UpdateTaskInput) -> DomainResult<Task> {
        let actor = self.require_actor().await?;

        let mut task = self
            .repo
            .get(id, actor.id)
            .await?
            .ok_or(DomainError::NotFound)?;

        if let Some(title) = changes.title {
            let title = sanitize_input(&title);
            validate_task_input(&title, None)?;
            task.title = title;
        }
        if let Some(description) = changes.description {
            let description = sanitize_input(&description);
            validate_task_input(&task.title, Some(&description))?;
            task.description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();

        self.repo.update(&task).await
    }

    /// Flip an owned task between completed and todo.
    pub async fn toggle_complete(&self, id: Uuid) -> DomainResult<Task> {
        let actor = self.require_actor().await?;

        let mut task = self
            .repo
            .get(id, actor.id)
            .await?
            .ok_or(DomainError::NotFound)?;

        task.status = task.status.toggled();
        task.updated_at = Utc::now();

        self.repo.update(&task).await
    }

    /// Delete an owned task. A repeated delete surfaces `NotFound`.
    pub async fn delete_task(&self, id: Uuid) -> DomainResult<()> {
        let actor = self.require_actor().await?;
        self.repo.delete(id, actor.id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// List the actor's tasks, newest first, with optional filters.
    pub async fn list_tasks(&self, filters: TaskFilters) -> DomainResult<Vec<Task>> {
        let actor = self.require_actor().await?;
        self.repo.list(actor.id, filters).await
    }

    /// Fetch a single owned task.
    pub async fn get_task(&self, id: Uuid) -> DomainResult<Task> {
        let actor = self.require_actor().await?;
        self.repo
            .get(id, actor.id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Recompute score and reasoning for all of the actor's tasks.
    ///
    /// The categorization is re-extracted from each stored reasoning
    /// string; tasks whose reasoning carries no levels fall back to
    /// Medium/Medium. Only score and reasoning change.
    pub async fn rescore_tasks(&self) -> DomainResult<Vec<Task>> {
        let actor = self.require_actor().await?;
        let tasks = self.repo.list(actor.id, TaskFilters::default()).await?;

        let today = Utc::now().date_naive();
        let mut rescored = Vec::with_capacity(tasks.len());
        for mut task in tasks {
            let categorization = TaskCategorization::from_reasoning(&task.ai_reasoning);
            let result = calculate_priority_score(
                Some(&categorization),
                task.priority,
                task.due_date,
                today,
            );
            if result.score != task.ai_priority_score || result.reasoning != task.ai_reasoning {
                task.ai_priority_score = result.score;
                task.ai_reasoning = result.reasoning;
                task.updated_at = Utc::now();
                task = self.repo.update(&task).await?;
            }
            rescored.push(task);
        }

        info!(count = rescored.len(), "tasks rescored");
        Ok(rescored)
    }
}
