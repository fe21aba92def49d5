//! File operation error types.

use thiserror::Error;

use crate::storage::StorageError;

/// File operation errors.
#[derive(Debug, Error)]
pub enum FileError {
    /// No metadata record exists for the requested id.
    #[error("file not found: {0}")]
    NotFound(i32),

    /// Storage backend operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Metadata store operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl FileError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: i32) -> Self {
        Self::NotFound(id)
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
