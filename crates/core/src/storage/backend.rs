//! Storage backend implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};

use super::config::StorageProvider;
use super::error::StorageError;

/// Blob storage backend, selected once at process start.
///
/// Both variants expose the same save/load/delete contract; they differ only
/// in how the underlying medium's failures are classified.
pub enum StorageBackend {
    /// Local filesystem rooted at a fixed base directory.
    LocalFs(Operator),
    /// S3-compatible remote object store with a fixed bucket.
    S3(Operator),
}

impl StorageBackend {
    /// Create a storage backend from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                let operator = Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish();
                Ok(Self::S3(operator))
            }
            StorageProvider::LocalFs { root } => {
                // The operator creates the root directory lazily on first write.
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid root path"))?,
                );

                let operator = Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish();
                Ok(Self::LocalFs(operator))
            }
        }
    }

    /// Get the backend name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs(_) => "local",
            Self::S3(_) => "s3",
        }
    }

    fn operator(&self) -> &Operator {
        match self {
            Self::LocalFs(op) | Self::S3(op) => op,
        }
    }

    /// Map an OpenDAL error onto this backend's failure classes.
    fn classify(&self, key: &str, err: &opendal::Error) -> StorageError {
        if err.kind() == ErrorKind::NotFound {
            return StorageError::not_found(key);
        }
        match self {
            Self::LocalFs(_) => StorageError::io(err.to_string()),
            Self::S3(_) if err.is_temporary() => StorageError::unavailable(err.to_string()),
            Self::S3(_) => StorageError::service(err.to_string()),
        }
    }

    /// Write `content` under `key`, overwriting any existing blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium is unreachable, unwritable, or full.
    pub async fn save(&self, key: &str, content: Vec<u8>) -> Result<(), StorageError> {
        self.operator()
            .write(key, content)
            .await
            .map(|_| ())
            .map_err(|e| self.classify(key, &e))
    }

    /// Read the full blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no blob exists under `key`, or a
    /// medium failure otherwise.
    pub async fn load(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let buffer = self
            .operator()
            .read(key)
            .await
            .map_err(|e| self.classify(key, &e))?;
        Ok(buffer.to_vec())
    }

    /// Remove the blob stored under `key`.
    ///
    /// Existence is checked first so that a missing key fails identically on
    /// both variants (remote object deletes are otherwise idempotent).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no blob exists under `key`, or a
    /// medium failure otherwise.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator()
            .stat(key)
            .await
            .map_err(|e| self.classify(key, &e))?;
        self.operator()
            .delete(key)
            .await
            .map_err(|e| self.classify(key, &e))
    }
}
