//! Error types for lawnbook
//!
//! One error enum for the whole library, with a `Result` alias.

use thiserror::Error;

use crate::models::JobId;

/// Main error type for job book operations
#[derive(Error, Debug)]
pub enum LawnError {
    /// A textual value did not match any member of a closed set
    #[error("Unknown {kind} value: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    /// Two records share the same identifier
    #[error("Duplicate job id {id}")]
    DuplicateJob { id: JobId },

    /// Every identifier up to `JobId::MAX` is taken
    #[error("No job id left after {last}")]
    IdsExhausted { last: JobId },

    /// Lookup by identifier failed
    #[error("Job {id} not found")]
    JobNotFound { id: JobId },

    /// Subscription status transition not allowed
    #[error("Invalid status transition for job {id} from {from} on {event}: {reason}")]
    InvalidTransition {
        id: JobId,
        from: String,
        event: String,
        reason: String,
    },

    /// Season table errors
    #[error("Season error: {0}")]
    SeasonError(String),

    /// Date parsing or ordering errors
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for job book operations
pub type Result<T> = std::result::Result<T, LawnError>;

/// Convert anyhow errors to LawnError
impl From<anyhow::Error> for LawnError {
    fn from(err: anyhow::Error) -> Self {
        LawnError::Generic(err.to_string())
    }
}

impl LawnError {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        LawnError::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}
