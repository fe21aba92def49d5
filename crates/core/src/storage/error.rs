//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
///
/// The local filesystem backend reports medium failures as `Io`; the remote
/// backend distinguishes connectivity failures (`Unavailable`) from
/// server-side rejections (`Service`). Both backends report missing keys as
/// `NotFound`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No blob exists under the requested key.
    #[error("blob not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Local medium read/write/delete failure.
    #[error("storage I/O failure: {0}")]
    Io(String),

    /// Remote store rejected the operation.
    #[error("storage service failure: {0}")]
    Service(String),

    /// Remote store unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an I/O failure error.
    #[must_use]
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create a service failure error.
    #[must_use]
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
