//! File service orchestrating metadata and blob persistence.
//!
//! On upload the service writes a metadata record, then the blob; the two
//! writes are not atomic, so a storage failure can leave a metadata row with
//! no backing blob. On delete the blob is removed before the metadata so a
//! failed blob delete never loses the record pointing at it.

mod error;
mod service;
mod types;

pub use error::FileError;
pub use service::{FileRepository, FileService, generate_stored_name};
pub use types::{CreateFileInput, FileDownload, FileRecord, SaveFileInput};
