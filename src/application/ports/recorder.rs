//! Audio capture port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{AudioMode, Duration, FileReference, QualityPreset};

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(String),

    #[error("Failed to write recording: {0}")]
    WriteFailed(String),

    #[error("No audio data captured")]
    Empty,

    #[error("No audio device available")]
    NoAudioDevice,
}

/// Microphone permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Not asked yet; a request is needed before capture
    Undetermined,
}

impl PermissionStatus {
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Result of finishing a capture: a replayable file and its length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedCapture {
    pub file: FileReference,
    pub duration: Duration,
}

/// Port for the platform audio capture subsystem
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// In-progress capture produced by `begin_capture`
    type Handle: CaptureHandle;

    /// Current permission state, without prompting
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompt for microphone permission
    async fn request_permission(&self) -> PermissionStatus;

    /// Start capturing with the given preset.
    ///
    /// # Returns
    /// A handle owning the running capture
    async fn begin_capture(
        &self,
        preset: QualityPreset,
        mode: AudioMode,
    ) -> Result<Self::Handle, CaptureError>;
}

/// A running capture
#[async_trait]
pub trait CaptureHandle: Send + Sync + 'static {
    /// Where the finalized audio will be stored
    fn uri(&self) -> FileReference;

    /// Time captured so far
    fn elapsed(&self) -> Duration;

    /// Stop capturing and materialize a playable file
    async fn finalize(self) -> Result<FinalizedCapture, CaptureError>;

    /// Stop capturing and drop the audio
    async fn discard(self) -> Result<(), CaptureError>;
}
