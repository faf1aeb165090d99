//! Taskwise - AI-assisted personal task management
//!
//! Taskwise lets an authenticated actor manage a personal task list. Each
//! new task is classified by an external language model for business
//! impact and implementation effort, and that categorization is combined
//! with the requested priority and due-date proximity into a 1-5 priority
//! score, a human-readable justification, and the task's stored priority
//! label.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): Models, ports, and the error taxonomy
//! - **Service Layer** (`services`): Priority scoring and task orchestration
//! - **Adapters** (`adapters`): SQLite, cache, rate limit, identity
//! - **Infrastructure** (`infrastructure`): Classifier HTTP client, config
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Actor, Config, CreateTaskInput, Level, PriorityLevel, Task, TaskCategorization, TaskStatus,
    UpdateTaskInput,
};
pub use domain::ports::{
    ClassificationCache, IdentityProvider, RateLimiter, TaskClassifier, TaskFilters,
    TaskRepository,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{calculate_priority_score, score_to_priority_level, TaskService};
