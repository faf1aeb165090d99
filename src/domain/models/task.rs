//! Task domain model.
//!
//! Tasks belong to exactly one owner and carry both the user-visible
//! fields and the AI-derived scoring metadata.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is open and not yet started
    Todo,
    /// Task is actively being worked on
    InProgress,
    /// Task is done
    Completed,
    /// Task was abandoned
    Cancelled,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "completed" | "complete" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The status a completion toggle moves this status to.
    ///
    /// Not a state machine: anything other than `Completed` flips to
    /// `Completed`, and `Completed` flips back to `Todo`.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Completed => Self::Todo,
            _ => Self::Completed,
        }
    }
}

/// Priority level of a task.
///
/// For newly created tasks this is the AI-derived label from the priority
/// score, not the level the caller requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for PriorityLevel {
    fn default() -> Self {
        Self::Medium
    }
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    /// Multiplier applied to the base impact/effort score.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Urgent => 1.5,
            Self::High => 1.3,
            Self::Medium => 1.0,
            Self::Low => 0.8,
        }
    }
}

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub email: String,
}

/// A task owned by a single actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Owning actor; immutable after creation
    pub owner_id: Uuid,
    /// Short title (1-200 chars after sanitization)
    pub title: String,
    /// Optional longer description (max 1000 chars)
    pub description: Option<String>,
    /// AI-derived priority label
    pub priority: PriorityLevel,
    /// Current status
    pub status: TaskStatus,
    /// Priority score 1-5 computed at creation
    pub ai_priority_score: i32,
    /// Human-readable justification for the score
    pub ai_reasoning: String,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// When created (server-assigned)
    pub created_at: DateTime<Utc>,
    /// When last updated (server-assigned)
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task owned by `owner_id` with server-assigned id and
    /// timestamps. Scoring fields start neutral; the task service fills
    /// them in before persisting.
    pub fn new(owner_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            description: None,
            priority: PriorityLevel::default(),
            status: TaskStatus::default(),
            ai_priority_score: 1,
            ai_reasoning: String::new(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Whether the task is past its due date relative to `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: Option<String>,
    /// The priority the caller requested. Only influences the score
    /// multiplier; the persisted label is AI-derived.
    pub priority: PriorityLevel,
    pub due_date: Option<NaiveDate>,
}

/// Partial update for an existing task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<PriorityLevel>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
}

impl UpdateTaskInput {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation_defaults() {
        let owner = Uuid::new_v4();
        let task = Task::new(owner, "Write release notes");
        assert_eq!(task.owner_id, owner);
        assert_eq!(task.title, "Write release notes");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, PriorityLevel::Medium);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_status_toggle_is_binary() {
        assert_eq!(TaskStatus::Todo.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Cancelled.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Todo);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ] {
            assert_eq!(TaskStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::from_str("canceled"), Some(TaskStatus::Cancelled));
        assert_eq!(TaskStatus::from_str("bogus"), None);
    }

    #[test]
    fn test_priority_weights() {
        assert!((PriorityLevel::Urgent.weight() - 1.5).abs() < f64::EPSILON);
        assert!((PriorityLevel::High.weight() - 1.3).abs() < f64::EPSILON);
        assert!((PriorityLevel::Medium.weight() - 1.0).abs() < f64::EPSILON);
        assert!((PriorityLevel::Low.weight() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let task = Task::new(Uuid::new_v4(), "t")
            .with_due_date(Some(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()));
        assert!(task.is_overdue(today));

        let task = Task::new(Uuid::new_v4(), "t").with_due_date(Some(today));
        assert!(!task.is_overdue(today));

        let task = Task::new(Uuid::new_v4(), "t");
        assert!(!task.is_overdue(today));
    }
}
