//! Error types for agenda.

use thiserror::Error;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Rejected input. Raised before any mutation, store state is untouched.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The key-value backend failed to write. The in-memory set was not changed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Only raised when the store runs with `MissingIdPolicy::Strict`.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AgendaError {
    /// Re-tag a backend failure as a persistence failure for store callers.
    pub(crate) fn into_persistence(self) -> Self {
        match self {
            AgendaError::Persistence(_) => self,
            other => AgendaError::Persistence(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AgendaError {
    fn from(e: serde_json::Error) -> Self {
        AgendaError::Serialization(e.to_string())
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
