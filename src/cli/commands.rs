//! Command handlers for the taskwise CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::adapters::SqliteTaskRepository;
use crate::cli::output::{count_line, format_task_detail, format_task_matrix, format_task_table};
use crate::domain::errors::DomainError;
use crate::domain::models::{CreateTaskInput, PriorityLevel, TaskStatus, UpdateTaskInput};
use crate::domain::ports::TaskFilters;
use crate::infrastructure::classifier::ClassifierGateway;
use crate::services::TaskService;

/// Concrete service type wired by the CLI.
pub type AppTaskService = TaskService<SqliteTaskRepository, ClassifierGateway>;

fn parse_priority(s: &str) -> Result<PriorityLevel> {
    PriorityLevel::from_str(s)
        .ok_or_else(|| DomainError::Validation(vec!["Invalid priority level".to_string()]).into())
}

fn parse_status(s: &str) -> Result<TaskStatus> {
    TaskStatus::from_str(s)
        .ok_or_else(|| DomainError::Validation(vec!["Invalid status".to_string()]).into())
}

fn parse_due_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid due date '{s}', expected YYYY-MM-DD"))
}

fn parse_task_id(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).with_context(|| format!("Invalid task id '{s}'"))
}

pub async fn handle_add(
    service: &AppTaskService,
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due: Option<String>,
    json: bool,
) -> Result<()> {
    let priority = priority
        .as_deref()
        .map(parse_priority)
        .transpose()?
        .unwrap_or_default();
    let due_date = due.as_deref().map(parse_due_date).transpose()?;

    let task = service
        .create_task(CreateTaskInput {
            title,
            description,
            priority,
            due_date,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task created.");
        println!("{}", format_task_detail(&task));
    }
    Ok(())
}

pub async fn handle_list(
    service: &AppTaskService,
    status: Option<String>,
    priority: Option<String>,
    limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let filters = TaskFilters {
        status: status.as_deref().map(parse_status).transpose()?,
        priority: priority.as_deref().map(parse_priority).transpose()?,
        limit,
    };

    let tasks = service.list_tasks(filters).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        println!("{}", count_line("task", tasks.len()));
        println!("{}", format_task_table(&tasks));
    }
    Ok(())
}

pub async fn handle_matrix(service: &AppTaskService, json: bool) -> Result<()> {
    let tasks = service.list_tasks(TaskFilters::default()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        println!("{}", format_task_matrix(&tasks));
    }
    Ok(())
}

pub async fn handle_show(service: &AppTaskService, id: String, json: bool) -> Result<()> {
    let task = service.get_task(parse_task_id(&id)?).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("{}", format_task_detail(&task));
    }
    Ok(())
}

pub async fn handle_done(service: &AppTaskService, id: String, json: bool) -> Result<()> {
    let task = service.toggle_complete(parse_task_id(&id)?).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task is now {}.", task.status.as_str());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_update(
    service: &AppTaskService,
    id: String,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    due: Option<String>,
    json: bool,
) -> Result<()> {
    let changes = UpdateTaskInput {
        title,
        description,
        priority: priority.as_deref().map(parse_priority).transpose()?,
        status: status.as_deref().map(parse_status).transpose()?,
        due_date: due.as_deref().map(parse_due_date).transpose()?,
    };

    if changes.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let task = service.update_task(parse_task_id(&id)?, changes).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task updated.");
        println!("{}", format_task_detail(&task));
    }
    Ok(())
}

pub async fn handle_rm(service: &AppTaskService, id: String, json: bool) -> Result<()> {
    let id = parse_task_id(&id)?;
    service.delete_task(id).await?;

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Task deleted.");
    }
    Ok(())
}

pub async fn handle_rescore(service: &AppTaskService, json: bool) -> Result<()> {
    let tasks = service.rescore_tasks().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        println!("Rescored {} task(s).", tasks.len());
        if !tasks.is_empty() {
            println!("{}", format_task_table(&tasks));
        }
    }
    Ok(())
}
