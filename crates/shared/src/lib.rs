//! Shared configuration types for Fileshelf.
//!
//! This crate provides configuration loading used by the server and
//! migrator binaries.

pub mod config;

pub use config::{AppConfig, DatabaseConfig, ServerConfig, StorageSettings};
