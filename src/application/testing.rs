//! In-memory port doubles shared by the use case tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::recording::{AudioMode, Duration, FileReference, QualityPreset};

use super::ports::{
    AudioCapture, AudioPlayer, CaptureError, CaptureHandle, FinalizedCapture, KeyValueStore,
    PermissionStatus, PlaybackError, StorageError,
};

#[derive(Default)]
pub struct CaptureLog {
    pub begun: AtomicUsize,
    pub discarded: AtomicUsize,
    pub permission_requests: AtomicUsize,
}

pub struct MockCapture {
    pub permission: PermissionStatus,
    pub granted_on_request: bool,
    pub fail_finalize: bool,
    pub duration_ms: u64,
    pub log: Arc<CaptureLog>,
}

impl MockCapture {
    pub fn granted() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            granted_on_request: true,
            fail_finalize: false,
            duration_ms: 65_000,
            log: Arc::new(CaptureLog::default()),
        }
    }
}

pub struct MockHandle {
    serial: usize,
    fail_finalize: bool,
    duration_ms: u64,
    log: Arc<CaptureLog>,
}

#[async_trait]
impl AudioCapture for MockCapture {
    type Handle = MockHandle;

    async fn permission_status(&self) -> PermissionStatus {
        self.permission
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.log.permission_requests.fetch_add(1, Ordering::SeqCst);
        if self.granted_on_request {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn begin_capture(
        &self,
        _preset: QualityPreset,
        _mode: AudioMode,
    ) -> Result<MockHandle, CaptureError> {
        let serial = self.log.begun.fetch_add(1, Ordering::SeqCst);
        Ok(MockHandle {
            serial,
            fail_finalize: self.fail_finalize,
            duration_ms: self.duration_ms,
            log: Arc::clone(&self.log),
        })
    }
}

#[async_trait]
impl CaptureHandle for MockHandle {
    fn uri(&self) -> FileReference {
        FileReference::new(format!("/tmp/memo-{}.flac", self.serial))
    }

    fn elapsed(&self) -> Duration {
        Duration::from_millis(1500)
    }

    async fn finalize(self) -> Result<FinalizedCapture, CaptureError> {
        if self.fail_finalize {
            return Err(CaptureError::FinalizeFailed("could not unload".into()));
        }
        Ok(FinalizedCapture {
            file: self.uri(),
            duration: Duration::from_millis(self.duration_ms),
        })
    }

    async fn discard(self) -> Result<(), CaptureError> {
        self.log.discarded.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MockPlayer {
    pub played: Arc<Mutex<Vec<FileReference>>>,
}

#[async_trait]
impl AudioPlayer for MockPlayer {
    async fn play(&self, file: &FileReference) -> Result<(), PlaybackError> {
        self.played.lock().unwrap().push(file.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MockStore {
    pub data: Arc<Mutex<HashMap<String, String>>>,
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool, StorageError> {
        let mut data = self.data.lock().unwrap();
        if data.contains_key(key) {
            return Ok(false);
        }
        data.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}

pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::ReadFailed("disk gone".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("disk gone".into()))
    }

    async fn insert_if_absent(&self, _key: &str, _value: &str) -> Result<bool, StorageError> {
        Err(StorageError::WriteFailed("disk gone".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("disk gone".into()))
    }
}
