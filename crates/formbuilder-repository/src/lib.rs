//! Storage layer for saved form schemas
//!
//! This crate provides a unified interface for persisting finished form
//! schemas to different storage backends (file system, memory).
//!
//! # Features
//!
//! - **File System Repository**: One JSON file per storage key, cached between reads
//! - **Memory Repository**: Keeps the serialized payload in process memory
//! - **Async API**: Non-blocking I/O operations with Tokio
//!
//! The stored payload is a JSON array of form schemas under a single key,
//! the same layout the browser front end writes to local storage. Saving
//! appends, deleting filters by id, and a key that was never written loads
//! as an empty list.
//!
//! # Quick Start
//!
//! ```no_run
//! use formbuilder_core::{FieldType, FormField, FormSchema};
//! use formbuilder_repository::{FileSystemRepository, FormRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = FileSystemRepository::new("data")?;
//!
//!     let form = FormSchema::new(
//!         "1700000000000",
//!         "Signup",
//!         vec![FormField::new("email", FieldType::Text, "Email").required()],
//!     );
//!     repo.save_form(&form).await?;
//!
//!     let saved = repo.get_form("1700000000000").await?;
//!     println!("Loaded form: {}", saved.name);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Cache Statistics
//!
//! ```no_run
//! use formbuilder_repository::{CacheableRepository, FileSystemRepository, FormRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = FileSystemRepository::new("data")?;
//!
//!     // First load reads the file, second is served from cache
//!     let _ = repo.load_forms().await?;
//!     let _ = repo.load_forms().await?;
//!
//!     let stats = repo.cache_stats();
//!     println!("Cache hit rate: {:.2}%", stats.hit_rate() * 100.0);
//!
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod models;
pub mod traits;

// Re-exports - Configuration
pub use config::{ConfigError, RepositoryConfig, RepositorySource, DEFAULT_STORAGE_KEY};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Repositories
pub use file_system::FileSystemRepository;
pub use memory::MemoryRepository;
pub use models::*;
pub use traits::*;
