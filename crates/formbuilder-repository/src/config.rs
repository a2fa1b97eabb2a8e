//! Repository configuration types
//!
//! This module provides configuration for the storage backends (file
//! system, memory) and opens the configured repository.

use crate::file_system::FileSystemRepository;
use crate::memory::MemoryRepository;
use crate::traits::FormRepository;
use crate::RepositoryResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Storage key the browser front end uses for saved forms
pub const DEFAULT_STORAGE_KEY: &str = "formBuilder_savedForms";

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Repository source type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// One JSON file per storage key
    #[default]
    FileSystem,
    /// Process memory (for testing or embedding)
    Memory,
}

/// Repository configuration
///
/// # Examples
///
/// ```rust
/// use formbuilder_repository::RepositoryConfig;
///
/// // File system repository
/// let config = RepositoryConfig::file_system("data");
///
/// // Memory repository with a custom key
/// let config = RepositoryConfig::memory().with_storage_key("drafts");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Configuration source type
    #[serde(default)]
    pub source: RepositorySource,

    /// Directory holding the storage file (required for FileSystem source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Key under which all saved forms are stored
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            source: RepositorySource::default(),
            base_path: None,
            storage_key: default_storage_key(),
        }
    }
}

impl RepositoryConfig {
    /// Create a file system repository configuration
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            source: RepositorySource::FileSystem,
            base_path: Some(path.into()),
            storage_key: default_storage_key(),
        }
    }

    /// Create a memory repository configuration
    pub fn memory() -> Self {
        Self {
            source: RepositorySource::Memory,
            base_path: None,
            storage_key: default_storage_key(),
        }
    }

    /// Set the storage key
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                backend: self.source_name().to_string(),
                field: "storage_key".to_string(),
            });
        }

        match self.source {
            RepositorySource::FileSystem => {
                if self.base_path.is_none() {
                    return Err(ConfigError::MissingField {
                        backend: "FileSystem".to_string(),
                        field: "base_path".to_string(),
                    });
                }
            }
            RepositorySource::Memory => {
                // Memory source doesn't require any fields
            }
        }
        Ok(())
    }

    /// Validate and open the configured repository
    pub fn open(&self) -> RepositoryResult<Arc<dyn FormRepository>> {
        self.validate()?;

        match self.source {
            RepositorySource::FileSystem => {
                let base = self.base_path.as_deref().unwrap_or_default();
                info!(path = base, key = %self.storage_key, "opening file system repository");
                let repo = FileSystemRepository::new(base)?.with_storage_key(&self.storage_key);
                Ok(Arc::new(repo))
            }
            RepositorySource::Memory => {
                info!(key = %self.storage_key, "opening memory repository");
                Ok(Arc::new(
                    MemoryRepository::new().with_storage_key(&self.storage_key),
                ))
            }
        }
    }

    fn source_name(&self) -> &'static str {
        match self.source {
            RepositorySource::FileSystem => "FileSystem",
            RepositorySource::Memory => "Memory",
        }
    }
}

/// Configuration error
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    #[error("{backend} source requires {field} to be set")]
    MissingField { backend: String, field: String },
}
