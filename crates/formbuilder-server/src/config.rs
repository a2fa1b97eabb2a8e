//! Server configuration

use formbuilder_repository::{RepositoryConfig, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where saved forms are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RepositoryType {
    /// File system repository
    FileSystem {
        /// Directory holding the storage file (default: "data")
        #[serde(default = "default_repository_path")]
        path: PathBuf,

        /// Storage key, also the file name without `.json`
        #[serde(default = "default_storage_key")]
        storage_key: String,
    },
    /// Process memory; forms are lost on restart
    Memory,
}

fn default_repository_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for RepositoryType {
    fn default() -> Self {
        RepositoryType::FileSystem {
            path: default_repository_path(),
            storage_key: default_storage_key(),
        }
    }
}

impl RepositoryType {
    /// Repository configuration for the SDK
    pub fn to_repository_config(&self) -> RepositoryConfig {
        match self {
            RepositoryType::FileSystem { path, storage_key } => {
                RepositoryConfig::file_system(path.to_string_lossy().to_string())
                    .with_storage_key(storage_key.clone())
            }
            RepositoryType::Memory => RepositoryConfig::memory(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Saved form storage
    pub repository: RepositoryType,

    /// Log level for the form builder crates, used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            repository: RepositoryType::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Nested keys use a double underscore, e.g.
    /// `FORMBUILDER_REPOSITORY__PATH=/var/lib/forms`.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(
                config::Environment::with_prefix("FORMBUILDER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!(error = %e, "No usable config source, using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default tracing filter directives derived from `log_level`
    pub fn log_filter(&self) -> String {
        let level = self.log_level.trim();
        [
            "formbuilder_server",
            "formbuilder_sdk",
            "formbuilder_engine",
            "formbuilder_repository",
        ]
        .iter()
        .map(|target| format!("{}={}", target, level))
        .chain(std::iter::once("tower_http=debug".to_string()))
        .collect::<Vec<_>>()
        .join(",")
    }
}
