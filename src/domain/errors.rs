//! Domain errors for the taskwise system.

use thiserror::Error;

/// Domain-level errors. Every expected failure of a task operation is a
/// value of this type; nothing panics past the service boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No authenticated actor was available.
    #[error("Authentication required")]
    AuthRequired,

    /// The per-actor creation rate limit was exceeded.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Input validation failed. Messages are joined for display.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// No owned row matched. Ownership mismatches collapse into this
    /// variant so the existence of other actors' rows never leaks.
    #[error("Task not found")]
    NotFound,

    /// Datastore failure; the underlying message passes through verbatim.
    #[error("{0}")]
    Storage(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound,
            other => DomainError::Storage(other.to_string()),
        }
    }
}
