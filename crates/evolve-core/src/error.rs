//! Error types for the coaching engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{CardKind, PlanStatus, TaskKind};

/// Comprehensive error type for all engine operations.
#[derive(Error, Debug)]
pub enum CoachError {
    /// A status or count mutation was attempted on a locked task
    #[error("Task {id} is locked")]
    LockedTask { id: String },
    /// Plan activation was attempted on a plan that is not drafted
    #[error("Plan {id} cannot be activated from status '{}'", .status.as_str())]
    InvalidPlanState { id: String, status: PlanStatus },
    /// The advisory reply did not match the expected schema
    #[error("Malformed service reply: {reason}")]
    MalformedServiceReply { reason: String },
    /// The advisory call failed or timed out
    #[error("Advisory service unavailable: {message}")]
    ServiceUnavailable { message: String },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: String },
    /// The operation does not apply to this kind of task
    #[error("Operation '{operation}' is not valid for {} tasks", .kind.as_str())]
    InvalidTaskKind {
        operation: &'static str,
        kind: TaskKind,
    },
    /// No card is attached to the transcript entry
    #[error("No card attached to message {index}")]
    CardNotFound { index: usize },
    /// Cards are single-use
    #[error("Card on message {index} was already answered")]
    CardAlreadyAnswered { index: usize },
    /// The answer shape does not fit the card
    #[error("Answer for {expected} does not match the card on message {index}")]
    CardAnswerMismatch { index: usize, expected: CardKind },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CoachError {
        CoachError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CoachError {
        CoachError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CoachError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CoachError::database(message).with_source(e))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, CoachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoachError::LockedTask {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Task abc is locked");

        let err = CoachError::InvalidPlanState {
            id: "p1".to_string(),
            status: PlanStatus::Active,
        };
        assert_eq!(
            err.to_string(),
            "Plan p1 cannot be activated from status 'active'"
        );

        let err = CoachError::InvalidTaskKind {
            operation: "increment",
            kind: TaskKind::Single,
        };
        assert!(err.to_string().contains("single"));
    }

    #[test]
    fn test_db_context() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to read slot").unwrap_err();
        assert!(err.to_string().contains("Failed to read slot"));
    }
}
