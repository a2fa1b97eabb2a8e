//! Configuration types for FormWorkspace

use chrono::NaiveDate;
use formbuilder_repository::RepositoryConfig;
use serde::{Deserialize, Serialize};

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Where saved forms are stored
    pub repository: RepositoryConfig,

    /// Load saved forms when the workspace is built
    pub load_on_start: bool,

    /// Fixed "today" for age calculations in previews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

impl WorkspaceConfig {
    /// Create a new workspace configuration backed by memory storage
    pub fn new() -> Self {
        Self {
            repository: RepositoryConfig::memory(),
            load_on_start: true,
            reference_date: None,
        }
    }

    /// Set repository configuration
    pub fn with_repository(mut self, repository: RepositoryConfig) -> Self {
        self.repository = repository;
        self
    }

    /// Load saved forms on build
    pub fn with_load_on_start(mut self, enable: bool) -> Self {
        self.load_on_start = enable;
        self
    }

    /// Pin the date used for age calculations
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self::new()
    }
}
