//! Integration tests for the SQLite task repository.

mod common;

use chrono::NaiveDate;
use uuid::Uuid;

use taskwise::adapters::SqliteTaskRepository;
use taskwise::domain::models::Task;
use taskwise::{DomainError, PriorityLevel, TaskFilters, TaskRepository, TaskStatus};

use common::test_pool;

fn sample_task(owner_id: Uuid, title: &str) -> Task {
    let mut task = Task::new(owner_id, title)
        .with_description(Some("details".to_string()))
        .with_due_date(NaiveDate::from_ymd_opt(2025, 12, 24));
    task.priority = PriorityLevel::High;
    task.ai_priority_score = 4;
    task.ai_reasoning =
        "AI Analysis: Impact: High, Effort: Medium. Priority Score: 4/5".to_string();
    task
}

#[tokio::test]
async fn test_insert_get_round_trip() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool);
    let owner = Uuid::new_v4();

    let task = sample_task(owner, "Round trip");
    let inserted = repo.insert(&task).await.unwrap();
    assert_eq!(inserted, task);

    let fetched = repo.get(task.id, owner).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Round trip");
    assert_eq!(fetched.description.as_deref(), Some("details"));
    assert_eq!(fetched.priority, PriorityLevel::High);
    assert_eq!(fetched.ai_priority_score, 4);
    assert_eq!(fetched.due_date, NaiveDate::from_ymd_opt(2025, 12, 24));
    assert_eq!(fetched.created_at, task.created_at);
}

#[tokio::test]
async fn test_get_is_owner_scoped() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool);
    let owner = Uuid::new_v4();

    let task = sample_task(owner, "Mine");
    repo.insert(&task).await.unwrap();

    assert!(repo.get(task.id, owner).await.unwrap().is_some());
    assert!(repo.get(task.id, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_wrong_owner_is_not_found() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool);
    let owner = Uuid::new_v4();

    let task = sample_task(owner, "Original");
    repo.insert(&task).await.unwrap();

    let mut stolen = task.clone();
    stolen.owner_id = Uuid::new_v4();
    stolen.title = "Tampered".to_string();
    let err = repo.update(&stolen).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound));

    // The row is unchanged
    let fetched = repo.get(task.id, owner).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Original");
}

#[tokio::test]
async fn test_update_persists_fields() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool);
    let owner = Uuid::new_v4();

    let mut task = sample_task(owner, "Before");
    repo.insert(&task).await.unwrap();

    task.title = "After".to_string();
    task.status = TaskStatus::InProgress;
    task.due_date = None;
    let updated = repo.update(&task).await.unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert!(updated.due_date.is_none());
}

#[tokio::test]
async fn test_delete_owner_scoped_and_not_idempotent() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool);
    let owner = Uuid::new_v4();

    let task = sample_task(owner, "Short lived");
    repo.insert(&task).await.unwrap();

    let err = repo.delete(task.id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound));

    repo.delete(task.id, owner).await.unwrap();
    let err = repo.delete(task.id, owner).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound));
}

#[tokio::test]
async fn test_list_scopes_filters_and_limits() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool);
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    for i in 0..3 {
        let mut task = sample_task(owner, &format!("owned {i}"));
        // Distinct timestamps for a stable order
        task.created_at += chrono::Duration::milliseconds(i);
        task.updated_at = task.created_at;
        if i == 2 {
            task.status = TaskStatus::Completed;
            task.priority = PriorityLevel::Low;
        }
        repo.insert(&task).await.unwrap();
    }
    repo.insert(&sample_task(other, "not yours")).await.unwrap();

    let all = repo.list(owner, TaskFilters::default()).await.unwrap();
    assert_eq!(all.len(), 3, "only owned rows are visible");
    assert_eq!(all[0].title, "owned 2", "newest first");

    let completed = repo
        .list(
            owner,
            TaskFilters {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);

    let low = repo
        .list(
            owner,
            TaskFilters {
                priority: Some(PriorityLevel::Low),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(low.len(), 1);

    let limited = repo
        .list(
            owner,
            TaskFilters {
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}
