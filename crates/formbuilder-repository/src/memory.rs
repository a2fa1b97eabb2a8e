//! In-memory repository
//!
//! Holds the serialized payload rather than the decoded list, so it behaves
//! like browser local storage: every load parses, every save re-encodes.

use async_trait::async_trait;
use formbuilder_core::FormSchema;
use tokio::sync::RwLock;
use tracing::warn;

use crate::codec::{decode_forms, encode_forms};
use crate::config::DEFAULT_STORAGE_KEY;
use crate::{traits::FormRepository, RepositoryError, RepositoryResult};

/// Repository backed by process memory
pub struct MemoryRepository {
    storage_key: String,
    payload: RwLock<Option<String>>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            payload: RwLock::new(None),
        }
    }

    /// Seed the repository with a raw stored payload
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            payload: RwLock::new(Some(payload.into())),
        }
    }

    /// Use a different storage key
    pub fn with_storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    /// Raw stored payload, if anything has been written
    pub async fn payload(&self) -> Option<String> {
        self.payload.read().await.clone()
    }
}

/// Decode for a read-modify-write cycle, treating a corrupt payload as empty
fn decode_for_update(payload: Option<&str>) -> RepositoryResult<Vec<FormSchema>> {
    match payload.map(decode_forms) {
        None => Ok(Vec::new()),
        Some(Err(RepositoryError::Json(e))) => {
            warn!(error = %e, "discarding corrupt stored payload");
            Ok(Vec::new())
        }
        Some(result) => result,
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormRepository for MemoryRepository {
    async fn load_forms(&self) -> RepositoryResult<Vec<FormSchema>> {
        match self.payload.read().await.as_deref() {
            Some(payload) => decode_forms(payload),
            None => Ok(Vec::new()),
        }
    }

    async fn save_form(&self, form: &FormSchema) -> RepositoryResult<()> {
        let mut payload = self.payload.write().await;
        let mut forms = decode_for_update(payload.as_deref())?;
        forms.push(form.clone());
        *payload = Some(encode_forms(&forms)?);
        Ok(())
    }

    async fn delete_form(&self, id: &str) -> RepositoryResult<()> {
        let mut payload = self.payload.write().await;
        let forms = decode_for_update(payload.as_deref())?;
        let remaining: Vec<FormSchema> = forms.into_iter().filter(|f| f.id != id).collect();
        *payload = Some(encode_forms(&remaining)?);
        Ok(())
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }
}
