//! Form workspace initialization
//!
//! Converts server configuration into SDK configuration and builds the
//! shared `FormWorkspace`.

use crate::config::{RepositoryType, ServerConfig};
use anyhow::Result;
use formbuilder_sdk::{FormWorkspace, WorkspaceBuilder};
use tracing::info;

/// Initialize the form workspace
///
/// A file system storage directory is created if it does not exist yet.
pub async fn init_workspace(config: &ServerConfig) -> Result<FormWorkspace> {
    if let RepositoryType::FileSystem { path, .. } = &config.repository {
        tokio::fs::create_dir_all(path).await.map_err(|e| {
            anyhow::anyhow!("Failed to create storage directory {}: {}", path.display(), e)
        })?;
    }

    let workspace = WorkspaceBuilder::new()
        .with_repository(config.repository.to_repository_config())
        .load_on_start(true)
        .build()
        .await?;

    info!(
        saved_forms = workspace.saved_forms().len(),
        "form workspace initialized"
    );

    Ok(workspace)
}
