//! Recording session use case
//!
//! Owns the single capture session and the recordings list. Capturing is
//! strictly one-at-a-time: the session is a `CaptureSession` enum, so a second
//! handle can never be stored while one is active.

use chrono::{Local, Utc};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::recording::{
    AudioMode, Duration, ListError, QualityPreset, RecordingEntry, RecordingId, RecordingsList,
};
use crate::domain::session::{CaptureSession, CaptureState, InvalidStateTransition};

use super::ports::{
    AudioCapture, AudioPlayer, CaptureError, CaptureHandle, PermissionStatus, PlaybackError,
};

/// Errors from the recorder use case
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("A recording is already in progress")]
    AlreadyCapturing,

    #[error("Recording failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),

    #[error(transparent)]
    List(#[from] ListError),
}

/// Configuration for captures
#[derive(Debug, Clone, Copy, Default)]
pub struct RecorderConfig {
    pub preset: QualityPreset,
    pub mode: AudioMode,
}

/// How a start request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Permission was refused; nothing changed
    PermissionDenied,
}

/// How a toggle request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    PermissionDenied,
    Saved(RecordingEntry),
}

/// Recording session manager plus the recordings it produced
pub struct RecorderUseCase<C, P>
where
    C: AudioCapture,
    P: AudioPlayer,
{
    capture: C,
    player: P,
    session: CaptureSession<C::Handle>,
    recordings: RecordingsList,
    last_id: Option<RecordingId>,
    config: RecorderConfig,
}

impl<C, P> RecorderUseCase<C, P>
where
    C: AudioCapture,
    P: AudioPlayer,
{
    /// Create a new recorder with an empty list
    pub fn new(capture: C, player: P, config: RecorderConfig) -> Self {
        Self {
            capture,
            player,
            session: CaptureSession::new(),
            recordings: RecordingsList::new(),
            last_id: None,
            config,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.session.state()
    }

    pub fn is_capturing(&self) -> bool {
        self.session.is_capturing()
    }

    /// Time captured so far, zero when idle
    pub fn elapsed(&self) -> Duration {
        self.session
            .handle()
            .map(|handle| handle.elapsed())
            .unwrap_or_default()
    }

    pub fn recordings(&self) -> &RecordingsList {
        &self.recordings
    }

    /// Begin a capture.
    ///
    /// Asks for permission if it has not been decided yet. A refusal is not an
    /// error: the call returns `PermissionDenied` and the session stays idle.
    pub async fn start_capture(&mut self) -> Result<StartOutcome, RecorderError> {
        if self.session.is_capturing() {
            warn!("Start requested while a recording is in progress");
            return Err(RecorderError::AlreadyCapturing);
        }

        let mut permission = self.capture.permission_status().await;
        if permission == PermissionStatus::Undetermined {
            debug!("Requesting recording permission");
            permission = self.capture.request_permission().await;
        }
        if !permission.is_granted() {
            warn!(?permission, "Recording permission not granted");
            return Ok(StartOutcome::PermissionDenied);
        }

        let handle = self
            .capture
            .begin_capture(self.config.preset, self.config.mode)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to start recording");
                e
            })?;
        let uri = handle.uri();

        if let Err((err, handle)) = self.session.begin(handle) {
            // Guarded above; discard rather than leak the capture
            let _ = handle.discard().await;
            return Err(err.into());
        }

        info!(preset = %self.config.preset, file = %uri, "Recording started");
        Ok(StartOutcome::Started)
    }

    /// Finish the active capture and append it to the list.
    ///
    /// The session is idle afterwards even if finalization fails.
    pub async fn stop_capture(&mut self) -> Result<RecordingEntry, RecorderError> {
        let handle = self.session.finish()?;

        let finalized = handle.finalize().await.map_err(|e| {
            error!(error = %e, "Error stopping recording");
            e
        })?;

        let entry = RecordingEntry {
            id: self.next_id(),
            name: self.recordings.next_default_name(),
            duration: finalized.duration,
            file: finalized.file,
            created_at: Local::now(),
        };
        self.recordings.append(entry.clone());

        info!(id = %entry.id, name = %entry.name, duration = %entry.duration, "Recording saved");
        Ok(entry)
    }

    /// Drop the active capture without adding an entry
    pub async fn cancel_capture(&mut self) -> Result<(), RecorderError> {
        let handle = self.session.finish()?;
        handle.discard().await?;
        info!("Recording cancelled");
        Ok(())
    }

    /// Start when idle, stop when capturing
    pub async fn toggle(&mut self) -> Result<ToggleOutcome, RecorderError> {
        if self.session.is_capturing() {
            return self.stop_capture().await.map(ToggleOutcome::Saved);
        }
        match self.start_capture().await? {
            StartOutcome::Started => Ok(ToggleOutcome::Started),
            StartOutcome::PermissionDenied => Ok(ToggleOutcome::PermissionDenied),
        }
    }

    /// Replay a recording from the start. Other recordings may keep playing.
    pub async fn play(&self, id: RecordingId) -> Result<(), RecorderError> {
        let entry = self.recordings.get(id).ok_or(ListError::NotFound(id))?;
        debug!(id = %id, file = %entry.file, "Playing recording");
        self.player.play(&entry.file).await?;
        Ok(())
    }

    pub fn delete(&mut self, id: RecordingId) -> Option<RecordingEntry> {
        let removed = self.recordings.delete_by_id(id);
        if removed.is_some() {
            info!(id = %id, "Recording deleted");
        }
        removed
    }

    pub fn begin_rename(&mut self, index: usize) -> Result<(), RecorderError> {
        self.recordings.begin_rename(index)?;
        Ok(())
    }

    pub fn edit_name(&mut self, text: impl Into<String>) -> bool {
        self.recordings.set_edit_buffer(text)
    }

    pub fn commit_rename(&mut self) -> bool {
        self.recordings.commit_rename()
    }

    pub fn cancel_rename(&mut self) {
        self.recordings.cancel_rename();
    }

    /// Remove every recording. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.recordings.clear_all();
        info!(removed, "Recordings cleared");
        removed
    }

    /// Creation time in epoch ms, bumped past the previous id on collisions
    fn next_id(&mut self) -> RecordingId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = match self.last_id {
            Some(last) if now <= last.as_u64() => RecordingId::new(last.as_u64() + 1),
            _ => RecordingId::new(now),
        };
        self.last_id = Some(id);
        id
    }
}
