//! Core file-management logic for Fileshelf.
//!
//! This crate contains the storage backends and the file service with ZERO
//! web or database dependencies. Persistence is reached through the
//! `FileRepository` trait implemented by the db crate.
//!
//! # Modules
//!
//! - `storage` - Pluggable blob storage backends (local filesystem, S3)
//! - `file` - File service orchestrating metadata and blob persistence

pub mod file;
pub mod storage;
