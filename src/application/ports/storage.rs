//! Key-value persistence port

use async_trait::async_trait;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Failed to read store: {0}")]
    ReadFailed(String),

    #[error("Failed to write store: {0}")]
    WriteFailed(String),

    #[error("Store contents are corrupt: {0}")]
    Corrupt(String),
}

/// Port for string key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Write `value` only if `key` is absent, as one atomic step.
    ///
    /// # Returns
    /// `true` if the value was inserted, `false` if the key already existed
    async fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool, StorageError>;

    /// Delete `key`; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Blanket implementation for boxed store types
#[async_trait]
impl KeyValueStore for Box<dyn KeyValueStore> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.as_ref().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.as_ref().set(key, value).await
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool, StorageError> {
        self.as_ref().insert_if_absent(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.as_ref().remove(key).await
    }
}
