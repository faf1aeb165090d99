//! Business logic services.

pub mod priority_scoring;
pub mod task_service;
pub mod validation;

pub use priority_scoring::{
    calculate_priority_score, score_to_priority_level, PriorityFactors, PriorityScore,
};
pub use task_service::TaskService;
