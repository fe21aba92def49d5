//! File service implementation.

use std::sync::Arc;

use chrono::Utc;

use super::error::FileError;
use super::types::{CreateFileInput, FileDownload, FileRecord, SaveFileInput};
use crate::storage::StorageBackend;

/// Repository trait for file metadata persistence.
///
/// This trait is implemented by the db crate to provide actual database
/// operations.
pub trait FileRepository: Send + Sync {
    /// Create a new file record; the store assigns id and creation time.
    fn create(
        &self,
        input: CreateFileInput,
    ) -> impl std::future::Future<Output = Result<FileRecord, FileError>> + Send;

    /// Find a file record by id.
    fn find_by_id(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<Option<FileRecord>, FileError>> + Send;

    /// Delete a file record by id, returning whether a row was removed.
    fn delete(
        &self,
        id: i32,
    ) -> impl std::future::Future<Output = Result<bool, FileError>> + Send;
}

/// File service orchestrating metadata and blob persistence.
pub struct FileService<R: FileRepository> {
    storage: Arc<StorageBackend>,
    repo: Arc<R>,
}

impl<R: FileRepository> FileService<R> {
    /// Create a new file service.
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Persist an uploaded file: metadata record first, then the blob.
    ///
    /// The blob write happens outside the metadata transaction. If it fails,
    /// the metadata row is NOT rolled back and an orphan record can remain;
    /// callers surface this as an unprocessable upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata insert or the blob write fails.
    pub async fn save(&self, input: SaveFileInput) -> Result<FileRecord, FileError> {
        let stored_name = generate_stored_name(&input.original_name);

        let record = self
            .repo
            .create(CreateFileInput {
                original_name: input.original_name,
                stored_name,
                content_type: input.content_type,
                size: input.size,
            })
            .await?;

        self.storage
            .save(&record.stored_name, input.content)
            .await?;

        Ok(record)
    }

    /// Load a file's content and metadata by id.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` if no record exists for `id`. A missing
    /// blob despite existing metadata (an orphan record) propagates as a
    /// storage error.
    pub async fn load(&self, id: i32) -> Result<FileDownload, FileError> {
        let record = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| FileError::not_found(id))?;

        let content = self.storage.load(&record.stored_name).await?;

        Ok(FileDownload {
            name: record.original_name,
            content_type: record.content_type,
            size: record.size,
            content,
        })
    }

    /// Delete a file's blob and metadata by id.
    ///
    /// The blob is removed before the metadata record: if the blob delete
    /// fails the record is retained, so metadata never disappears while its
    /// blob might still exist.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` if no record exists for `id`, or a
    /// storage error if the blob delete fails.
    pub async fn delete(&self, id: i32) -> Result<(), FileError> {
        let record = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| FileError::not_found(id))?;

        self.storage.delete(&record.stored_name).await?;
        self.repo.delete(id).await?;

        Ok(())
    }
}

/// Derive the storage key for an upload.
///
/// Format: `<millis-since-epoch>_<sanitized-original-name>`. The millisecond
/// prefix is the sole collision guard between concurrent uploads of the same
/// name.
#[must_use]
pub fn generate_stored_name(original_name: &str) -> String {
    format!(
        "{}_{}",
        Utc::now().timestamp_millis(),
        sanitize_filename(original_name)
    )
}

/// Sanitize a client-supplied filename for use in a storage key.
///
/// Only ASCII alphanumeric characters, dots, hyphens, and underscores
/// survive, so the key can never traverse out of the backend's key space.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageError, StorageProvider};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI32, Ordering};

    /// Mock repository for testing.
    struct MockFileRepository {
        records: Mutex<HashMap<i32, FileRecord>>,
        next_id: AtomicI32,
    }

    impl MockFileRepository {
        fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
                next_id: AtomicI32::new(1),
            }
        }

        fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    impl FileRepository for MockFileRepository {
        async fn create(&self, input: CreateFileInput) -> Result<FileRecord, FileError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let record = FileRecord {
                id,
                original_name: input.original_name,
                stored_name: input.stored_name,
                content_type: input.content_type,
                size: input.size,
                created_at: Utc::now(),
            };
            self.records.lock().unwrap().insert(id, record.clone());
            Ok(record)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<FileRecord>, FileError> {
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn delete(&self, id: i32) -> Result<bool, FileError> {
            Ok(self.records.lock().unwrap().remove(&id).is_some())
        }
    }

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fileshelf-service-{}-{}", tag, std::process::id()))
    }

    fn local_service(root: &PathBuf) -> (FileService<MockFileRepository>, Arc<MockFileRepository>) {
        let storage = Arc::new(
            StorageBackend::from_provider(&StorageProvider::local_fs(root))
                .expect("should create backend"),
        );
        let repo = Arc::new(MockFileRepository::new());
        (FileService::new(storage, repo.clone()), repo)
    }

    fn upload(name: &str, content_type: &str, content: &[u8]) -> SaveFileInput {
        SaveFileInput {
            original_name: name.to_string(),
            content_type: content_type.to_string(),
            size: content.len() as i64,
            content: content.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let root = temp_root("roundtrip");
        let (service, _repo) = local_service(&root);

        let record = service
            .save(upload("a.txt", "text/plain", b"hello"))
            .await
            .expect("save should succeed");
        assert_eq!(record.original_name, "a.txt");
        assert_eq!(record.size, 5);

        let file = service.load(record.id).await.expect("load should succeed");
        assert_eq!(file.content, b"hello");
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.content_type, "text/plain");
        assert_eq!(file.size, 5);

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_load_unknown_id_is_not_found() {
        let root = temp_root("load-unknown");
        let (service, _repo) = local_service(&root);

        let err = service.load(99999).await.unwrap_err();
        assert!(matches!(err, FileError::NotFound(99999)));

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_delete_then_load_is_not_found() {
        let root = temp_root("delete-load");
        let (service, _repo) = local_service(&root);

        let record = service
            .save(upload("b.txt", "text/plain", b"bytes"))
            .await
            .unwrap();
        service.delete(record.id).await.expect("delete should succeed");

        let err = service.load(record.id).await.unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let root = temp_root("delete-twice");
        let (service, _repo) = local_service(&root);

        let record = service
            .save(upload("c.txt", "text/plain", b"bytes"))
            .await
            .unwrap();
        service.delete(record.id).await.unwrap();

        let err = service.delete(record.id).await.unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_save_storage_failure_leaves_metadata() {
        // Storage root is a regular file, so the blob write fails after the
        // metadata insert succeeded. The record is not rolled back.
        let root = temp_root("orphan");
        std::fs::write(&root, b"not a directory").expect("should create file");
        let (service, repo) = local_service(&root);

        let err = service
            .save(upload("d.txt", "text/plain", b"bytes"))
            .await
            .unwrap_err();
        assert!(matches!(err, FileError::Storage(StorageError::Io(_))));
        assert_eq!(repo.record_count(), 1);

        std::fs::remove_file(&root).ok();
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("invoice.pdf"), "invoice.pdf");
        assert_eq!(sanitize_filename("my file (1).pdf"), "my_file__1_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("日本語.pdf"), "___.pdf");
    }

    #[test]
    fn test_generate_stored_name_format() {
        let stored = generate_stored_name("a.txt");
        let (millis, name) = stored.split_once('_').expect("should contain separator");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(name, "a.txt");
    }
}
