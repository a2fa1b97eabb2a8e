//! File system based repository implementation

use async_trait::async_trait;
use formbuilder_core::FormSchema;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::codec::{decode_forms, encode_forms};
use crate::config::DEFAULT_STORAGE_KEY;
use crate::{error::RepositoryError, traits::*, CacheStats, RepositoryResult};

/// File system based repository
///
/// Keeps every saved form in `<root>/<storage_key>.json`, with the decoded
/// list cached between reads.
pub struct FileSystemRepository {
    /// Root path of the repository
    root_path: PathBuf,
    /// Key the forms are stored under
    storage_key: String,
    /// Decoded forms from the last read or write
    cache: Arc<RwLock<Option<Vec<FormSchema>>>>,
    /// Serializes read-modify-write cycles
    write_lock: tokio::sync::Mutex<()>,
    /// Cache statistics
    stats: Arc<Mutex<CacheStats>>,
}

impl FileSystemRepository {
    /// Create a new file system repository
    ///
    /// # Arguments
    /// * `root_path` - The directory holding the storage file. It must exist.
    ///
    /// # Example
    /// ```no_run
    /// use formbuilder_repository::FileSystemRepository;
    ///
    /// let repo = FileSystemRepository::new("data").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let path = root_path.as_ref();

        if !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        Ok(Self {
            root_path: abs_path,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            cache: Arc::new(RwLock::new(None)),
            write_lock: tokio::sync::Mutex::new(()),
            stats: Arc::new(Mutex::new(CacheStats::default())),
        })
    }

    /// Use a different storage key
    pub fn with_storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    /// Absolute root directory
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Path of the file backing the storage key
    pub fn storage_path(&self) -> PathBuf {
        self.root_path.join(format!("{}.json", self.storage_key))
    }

    async fn read_storage(&self) -> RepositoryResult<Vec<FormSchema>> {
        if let Some(forms) = self.cache.read().await.as_ref() {
            self.record_hit();
            return Ok(forms.clone());
        }
        self.record_miss();

        let path = self.storage_path();
        let forms = match fs::read_to_string(&path).await {
            Ok(payload) => decode_forms(&payload)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "storage file missing, no saved forms");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        self.store_cache(forms.clone()).await;
        Ok(forms)
    }

    /// Current list for a read-modify-write cycle. A corrupt payload counts
    /// as empty so the next write replaces it.
    async fn read_for_update(&self) -> RepositoryResult<Vec<FormSchema>> {
        match self.read_storage().await {
            Err(RepositoryError::Json(e)) => {
                warn!(path = %self.storage_path().display(), error = %e, "discarding corrupt storage file");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn write_storage(&self, forms: Vec<FormSchema>) -> RepositoryResult<()> {
        let path = self.storage_path();
        let payload = encode_forms(&forms)?;

        // Write beside the target then rename so readers never see a partial file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            warn!(path = %path.display(), error = %e, "failed to replace storage file");
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(path = %path.display(), count = forms.len(), "wrote saved forms");
        self.store_cache(forms).await;
        Ok(())
    }

    async fn store_cache(&self, forms: Vec<FormSchema>) {
        let size = forms.len();
        *self.cache.write().await = Some(forms);
        if let Ok(mut stats) = self.stats.lock() {
            stats.size = size;
        }
    }

    fn record_hit(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.hits += 1;
        }
    }

    fn record_miss(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.misses += 1;
        }
    }
}

#[async_trait]
impl FormRepository for FileSystemRepository {
    async fn load_forms(&self) -> RepositoryResult<Vec<FormSchema>> {
        self.read_storage().await
    }

    async fn save_form(&self, form: &FormSchema) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut forms = self.read_for_update().await?;
        forms.push(form.clone());
        self.write_storage(forms).await
    }

    async fn delete_form(&self, id: &str) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let forms = self.read_for_update().await?;
        let before = forms.len();
        let remaining: Vec<FormSchema> = forms.into_iter().filter(|f| f.id != id).collect();
        if remaining.len() == before {
            debug!(id, "delete of unknown form id");
        }
        self.write_storage(remaining).await
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl CacheableRepository for FileSystemRepository {
    fn cache_stats(&self) -> CacheStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn clear_cache(&self) {
        // A contended cache is left as is, stats included
        let Ok(mut cache) = self.cache.try_write() else {
            debug!("cache busy, not cleared");
            return;
        };
        *cache = None;
        if let Ok(mut stats) = self.stats.lock() {
            stats.size = 0;
        }
    }
}
