//! Store error types.

use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Could not check a connection out of the pool.
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// No task row with the given id.
    #[error("Task not found: {id}")]
    TaskNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// Description failed validation.
    #[error("{0}")]
    InvalidDescription(String),

    /// Priority value is outside the enum.
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),
}

impl StoreError {
    /// Whether this error should map to a 404 at the route layer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. })
    }

    /// Whether this error should map to a 400 at the route layer.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidDescription(_) | Self::InvalidPriority(_))
    }
}

impl From<remind_core::ValidationError> for StoreError {
    fn from(err: remind_core::ValidationError) -> Self {
        match err {
            remind_core::ValidationError::InvalidPriority(value) => Self::InvalidPriority(value),
            other => Self::InvalidDescription(other.to_string()),
        }
    }
}
