//! Builder pattern for FormWorkspace

use crate::config::WorkspaceConfig;
use crate::error::{Result, SdkError};
use crate::workspace::FormWorkspace;
use chrono::NaiveDate;
use formbuilder_repository::{FormRepository, RepositoryConfig};
use std::sync::Arc;
use tracing::info;

/// Builder for FormWorkspace
///
/// # Example
///
/// ```rust,ignore
/// use formbuilder_sdk::{RepositoryConfig, WorkspaceBuilder};
///
/// // Saved forms in data/formBuilder_savedForms.json
/// let workspace = WorkspaceBuilder::new()
///     .with_repository(RepositoryConfig::file_system("data"))
///     .build()
///     .await?;
///
/// // In-memory storage (for testing)
/// let workspace = WorkspaceBuilder::new()
///     .with_repository(RepositoryConfig::memory())
///     .build()
///     .await?;
/// ```
pub struct WorkspaceBuilder {
    config: WorkspaceConfig,
    repository: Option<Arc<dyn FormRepository>>,
}

impl WorkspaceBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: WorkspaceConfig::new(),
            repository: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: WorkspaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set repository configuration
    pub fn with_repository(mut self, config: RepositoryConfig) -> Self {
        self.config.repository = config;
        self
    }

    /// Use an already opened repository instead of the configured one
    pub fn with_repository_instance(mut self, repository: Arc<dyn FormRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Load saved forms on build
    pub fn load_on_start(mut self, enable: bool) -> Self {
        self.config.load_on_start = enable;
        self
    }

    /// Pin the date used for age calculations
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.config.reference_date = Some(date);
        self
    }

    /// Build the workspace
    ///
    /// Opens the configured repository unless one was supplied, then loads
    /// the saved forms if `load_on_start` is set.
    pub async fn build(self) -> Result<FormWorkspace> {
        let repository = match self.repository {
            Some(repository) => repository,
            None => self.config.repository.open().map_err(|e| {
                SdkError::ConfigError(format!("Failed to open repository: {}", e))
            })?,
        };

        info!(storage_key = %repository.storage_key(), "building form workspace");

        let load_on_start = self.config.load_on_start;
        let mut workspace = FormWorkspace::with_config(repository, self.config);
        if load_on_start {
            workspace.load_saved_forms().await;
        }

        Ok(workspace)
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
