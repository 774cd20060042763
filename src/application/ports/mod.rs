//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod player;
pub mod recorder;
pub mod storage;

// Re-export common types
pub use config::ConfigStore;
pub use player::{AudioPlayer, PlaybackError};
pub use recorder::{AudioCapture, CaptureError, CaptureHandle, FinalizedCapture, PermissionStatus};
pub use storage::{KeyValueStore, StorageError};
