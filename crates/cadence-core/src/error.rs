//! Error types for the scheduling library.

use serde::Serialize;
use thiserror::Error;

/// Conflict payload carried by [`SchedulerError::TimeConflict`].
///
/// Contains enough detail about the blocking plan for a client to offer
/// a "reschedule" flow instead of just failing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConflictingPlan {
    pub id: u64,
    pub title: String,
    pub scheduled_time: Option<String>,
    pub duration_minutes: u32,
    pub status: String,
}

/// Comprehensive error type for all scheduler operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Store connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Plan exists but belongs to a different user
    #[error("Plan with ID {id} does not belong to the requesting user")]
    Forbidden { id: u64 },
    /// The requested time window overlaps an existing active plan
    #[error(
        "Time conflict with plan {} ('{}') at {} for {} minutes",
        existing.id,
        existing.title,
        existing.scheduled_time.as_deref().unwrap_or("--:--"),
        existing.duration_minutes
    )]
    TimeConflict { existing: ConflictingPlan },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Filesystem errors when preparing the database location
    #[error("File system error at '{path}': {source}")]
    FileSystem {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SchedulerError {
    /// Creates an input validation error for a named field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }
}

/// Specialized extension trait for store-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| SchedulerError::database_error(message, e))
    }
}

/// Result type alias for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;
