//! File types and data structures.

use chrono::{DateTime, Utc};

/// Persisted file metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Unique identifier, assigned by the metadata store on creation.
    pub id: i32,
    /// Client-supplied filename at upload time.
    pub original_name: String,
    /// Key the blob is stored under in the storage backend.
    pub stored_name: String,
    /// MIME type as reported by the client.
    pub content_type: String,
    /// Byte length recorded at upload time.
    pub size: i64,
    /// Creation timestamp, set at persistence time.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a file metadata record.
#[derive(Debug, Clone)]
pub struct CreateFileInput {
    /// Client-supplied filename.
    pub original_name: String,
    /// Storage key for the blob.
    pub stored_name: String,
    /// MIME type.
    pub content_type: String,
    /// Byte length.
    pub size: i64,
}

/// Input for saving an uploaded file.
#[derive(Debug, Clone)]
pub struct SaveFileInput {
    /// Client-supplied filename.
    pub original_name: String,
    /// MIME type as reported by the client.
    pub content_type: String,
    /// Byte length as reported by the client.
    pub size: i64,
    /// Full file content.
    pub content: Vec<u8>,
}

/// A loaded file, assembled for download and never persisted.
#[derive(Debug, Clone)]
pub struct FileDownload {
    /// Original filename.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Recorded byte length.
    pub size: i64,
    /// Full file content.
    pub content: Vec<u8>,
}
