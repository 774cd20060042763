//! Key-value store persisted as a single JSON object
//!
//! The whole map is read on open and rewritten on every change. Writes go to
//! a temporary sibling first and are then renamed over the real file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::application::ports::{KeyValueStore, StorageError};

/// File-backed store, e.g. `~/.local/share/voice-memo/storage.json`
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                error!(path = %path.display(), error = %e, "Store file is not a JSON object");
                StorageError::Corrupt(e.to_string())
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::ReadFailed(e.to_string())),
        };

        debug!(path = %path.display(), keys = data.len(), "Opened store");
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, data: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self.data.lock().await;
        let previous = data.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&data).await {
            // Keep memory in step with disk
            match previous {
                Some(old) => data.insert(key.to_string(), old),
                None => data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool, StorageError> {
        let mut data = self.data.lock().await;
        if data.contains_key(key) {
            return Ok(false);
        }
        data.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&data).await {
            data.remove(key);
            return Err(e);
        }
        Ok(true)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self.data.lock().await;
        let Some(previous) = data.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&data).await {
            data.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}
