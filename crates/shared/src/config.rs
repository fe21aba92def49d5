//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Storage backend configuration.
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted upload body size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Storage backend selection, chosen once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "profile", rename_all = "snake_case")]
pub enum StorageSettings {
    /// Local filesystem storage.
    Local {
        /// Root directory for stored blobs.
        #[serde(default = "default_storage_root")]
        root: PathBuf,
    },
    /// S3-compatible remote object storage.
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// Bucket where blobs are stored.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Bucket region.
        region: String,
    },
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./storage")
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FILESHELF").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("should build config")
            .try_deserialize()
            .expect("should deserialize config")
    }

    #[test]
    fn test_local_profile_with_defaults() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/fileshelf"

            [server]

            [storage]
            profile = "local"
            "#,
        );

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_upload_size, 10 * 1024 * 1024);
        assert_eq!(config.database.max_connections, 10);
        assert!(matches!(
            config.storage,
            StorageSettings::Local { ref root } if root == &PathBuf::from("./storage")
        ));
    }

    #[test]
    fn test_s3_profile() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/fileshelf"

            [server]
            port = 9000

            [storage]
            profile = "s3"
            endpoint = "https://account.r2.cloudflarestorage.com"
            bucket = "files"
            access_key_id = "key"
            secret_access_key = "secret"
            region = "auto"
            "#,
        );

        assert_eq!(config.server.port, 9000);
        match config.storage {
            StorageSettings::S3 { bucket, region, .. } => {
                assert_eq!(bucket, "files");
                assert_eq!(region, "auto");
            }
            StorageSettings::Local { .. } => panic!("expected s3 profile"),
        }
    }
}
