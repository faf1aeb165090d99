//! Domain models.

pub mod categorization;
pub mod config;
pub mod task;

pub use categorization::{Level, TaskCategorization};
pub use config::{
    ActorConfig, CacheConfig, ClassifierConfig, Config, DatabaseConfig, LoggingConfig,
    RateLimitConfig, RetryConfig,
};
pub use task::{Actor, CreateTaskInput, PriorityLevel, Task, TaskStatus, UpdateTaskInput};
