//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::QualityPreset;

/// Directory name used under the platform data/config dirs
pub const APP_DIR_NAME: &str = "voice-memo";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the account store lives
    pub data_dir: Option<String>,
    /// Where captured memos are written
    pub recordings_dir: Option<String>,
    /// Capture quality preset name
    pub quality: Option<String>,
    /// Ask before clearing all recordings
    pub confirm_clear: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            data_dir: None,
            recordings_dir: None,
            quality: Some("high".to_string()),
            confirm_clear: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            recordings_dir: other.recordings_dir.or(self.recordings_dir),
            quality: other.quality.or(self.quality),
            confirm_clear: other.confirm_clear.or(self.confirm_clear),
        }
    }

    /// Get data_dir, or the platform data dir if not set
    pub fn data_dir_or_default(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("~/.local/share"))
                    .join(APP_DIR_NAME)
            })
    }

    /// Get recordings_dir, or `<data_dir>/recordings` if not set
    pub fn recordings_dir_or_default(&self) -> PathBuf {
        self.recordings_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir_or_default().join("recordings"))
    }

    /// Path of the JSON account store
    pub fn store_path(&self) -> PathBuf {
        self.data_dir_or_default().join("storage.json")
    }

    /// Get quality as parsed QualityPreset, or default if not set/invalid
    pub fn quality_or_default(&self) -> QualityPreset {
        self.quality
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get confirm_clear setting, or false if not set
    pub fn confirm_clear_or_default(&self) -> bool {
        self.confirm_clear.unwrap_or(false)
    }
}
