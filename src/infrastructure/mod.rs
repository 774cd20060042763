//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio devices and the filesystem.

pub mod audio;
pub mod config;
pub mod storage;

// Re-export adapters
pub use audio::{CpalCapture, RodioPlayer};
pub use config::XdgConfigStore;
pub use storage::{JsonFileStore, MemoryStore};
