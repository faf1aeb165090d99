//! SQLite implementation of the TaskRepository.
//!
//! Every statement filters by owner as well as id, so an id belonging to
//! another owner is indistinguishable from a missing row.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{PriorityLevel, Task, TaskStatus};
use crate::domain::ports::{TaskFilters, TaskRepository};

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, task: &Task) -> DomainResult<Task> {
        let row: TaskRow = sqlx::query_as(
            r#"INSERT INTO tasks (id, owner_id, title, description, priority, status,
               ai_priority_score, ai_reasoning, due_date, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#,
        )
        .bind(task.id.to_string())
        .bind(task.owner_id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(task.ai_priority_score)
        .bind(&task.ai_reasoning)
        .bind(task.due_date.map(|d| d.to_string()))
        .bind(task.created_at.to_rfc3339())
        .bind(task.updated_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Task>> {
        let row: Option<TaskRow> =
            sqlx::query_as("SELECT * FROM tasks WHERE id = ? AND owner_id = ?")
                .bind(id.to_string())
                .bind(owner_id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, task: &Task) -> DomainResult<Task> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"UPDATE tasks SET title = ?, description = ?, priority = ?, status = ?,
               ai_priority_score = ?, ai_reasoning = ?, due_date = ?, updated_at = ?
               WHERE id = ? AND owner_id = ?
               RETURNING *"#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(task.ai_priority_score)
        .bind(&task.ai_reasoning)
        .bind(task.due_date.map(|d| d.to_string()))
        .bind(task.updated_at.to_rfc3339())
        .bind(task.id.to_string())
        .bind(task.owner_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(DomainError::NotFound)?.try_into()
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, owner_id: Uuid, filters: TaskFilters) -> DomainResult<Vec<Task>> {
        let mut query = String::from("SELECT * FROM tasks WHERE owner_id = ?");
        let mut bindings: Vec<String> = vec![owner_id.to_string()];

        if let Some(status) = &filters.status {
            query.push_str(" AND status = ?");
            bindings.push(status.as_str().to_string());
        }
        if let Some(priority) = &filters.priority {
            query.push_str(" AND priority = ?");
            bindings.push(priority.as_str().to_string());
        }

        query.push_str(" ORDER BY created_at DESC");

        if filters.limit.is_some() {
            query.push_str(" LIMIT ?");
        }

        let mut q = sqlx::query_as::<_, TaskRow>(&query);
        for binding in &bindings {
            q = q.bind(binding);
        }
        if let Some(limit) = filters.limit {
            q = q.bind(limit);
        }

        let rows: Vec<TaskRow> = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    owner_id: String,
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    ai_priority_score: i32,
    ai_reasoning: String,
    due_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| DomainError::Storage(e.to_string()))?;
        let owner_id =
            Uuid::parse_str(&row.owner_id).map_err(|e| DomainError::Storage(e.to_string()))?;

        let priority = PriorityLevel::from_str(&row.priority)
            .ok_or_else(|| DomainError::Storage(format!("Invalid priority: {}", row.priority)))?;

        let status = TaskStatus::from_str(&row.status)
            .ok_or_else(|| DomainError::Storage(format!("Invalid status: {}", row.status)))?;

        let due_date = row
            .due_date
            .map(|s| s.parse::<chrono::NaiveDate>())
            .transpose()
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| DomainError::Storage(e.to_string()))?
            .with_timezone(&chrono::Utc);

        let updated_at = chrono::DateTime::parse_from_rfc3339(&row.updated_at)
            .map_err(|e| DomainError::Storage(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(Task {
            id,
            owner_id,
            title: row.title,
            description: row.description,
            priority,
            status,
            ai_priority_score: row.ai_priority_score,
            ai_reasoning: row.ai_reasoning,
            due_date,
            created_at,
            updated_at,
        })
    }
}
