//! Error types for plancal.

use thiserror::Error;

/// Errors that can occur in plancal operations.
#[derive(Error, Debug)]
pub enum PlanCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid draft: {0}")]
    InvalidDraft(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for plancal operations.
pub type PlanCalResult<T> = Result<T, PlanCalError>;
