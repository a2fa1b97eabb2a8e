//! Core trait definitions for the repository pattern
//!
//! This module defines two traits:
//!
//! - [`FormRepository`]: load, append and delete saved form schemas
//! - [`CacheableRepository`]: extension for cache management
//!
//! # Examples
//!
//! ```no_run
//! use formbuilder_repository::{FileSystemRepository, FormRepository};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = FileSystemRepository::new("data")?;
//!
//! for form in repo.load_forms().await? {
//!     println!("{} ({} fields)", form.name, form.fields.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use formbuilder_core::FormSchema;

use crate::{CacheStats, RepositoryError, RepositoryResult};

/// Storage for saved form schemas
///
/// All forms are kept under a single storage key. Writes are
/// read-modify-write of the whole list, matching the browser's local
/// storage layout.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Load every saved form, in save order.
    ///
    /// A key that has never been written loads as an empty list.
    async fn load_forms(&self) -> RepositoryResult<Vec<FormSchema>>;

    /// Append a form to the saved list
    async fn save_form(&self, form: &FormSchema) -> RepositoryResult<()>;

    /// Remove every form with this id. Removing a missing id is not an error.
    async fn delete_form(&self, id: &str) -> RepositoryResult<()>;

    /// Load one form by id
    async fn get_form(&self, id: &str) -> RepositoryResult<FormSchema> {
        self.load_forms()
            .await?
            .into_iter()
            .find(|f| f.id == id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }

    /// Storage key the forms live under
    fn storage_key(&self) -> &str;
}

/// Cache management for repositories that keep the decoded list in memory
pub trait CacheableRepository {
    /// Get cache statistics
    fn cache_stats(&self) -> CacheStats;

    /// Drop the cached list so the next load reads storage
    fn clear_cache(&self);
}
