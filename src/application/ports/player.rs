//! Audio playback port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::FileReference;

/// Errors that can occur during playback
#[derive(Error, Debug, Clone)]
pub enum PlaybackError {
    /// The recorded file is gone
    #[error("Recording file not found: {0}")]
    FileMissing(String),

    /// The file could not be decoded
    #[error("Failed to decode recording: {0}")]
    DecodeFailed(String),

    /// Failed to play the audio
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// No audio output device available
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),
}

/// Port trait for memo playback.
///
/// `play` returns once playback has started; several memos may play at once.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play a recording from the beginning
    async fn play(&self, file: &FileReference) -> Result<(), PlaybackError>;
}

/// Blanket implementation for boxed player types
#[async_trait]
impl AudioPlayer for Box<dyn AudioPlayer> {
    async fn play(&self, file: &FileReference) -> Result<(), PlaybackError> {
        self.as_ref().play(file).await
    }
}
