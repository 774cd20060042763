//! Memo playback using rodio
//!
//! Every `play` call gets its own output stream on a short-lived thread, so
//! several memos can play at once and replaying restarts from the beginning.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::ports::{AudioPlayer, PlaybackError};
use crate::domain::recording::FileReference;

/// Player for recorded memo files
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, file: &FileReference) -> Result<(), PlaybackError> {
        let path = file.path().to_path_buf();
        if !path.exists() {
            return Err(PlaybackError::FileMissing(path.display().to_string()));
        }

        let (started_tx, started_rx) = oneshot::channel();
        std::thread::Builder::new()
            .name("memo-playback".into())
            .spawn(move || play_sync(path, started_tx))
            .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

        started_rx
            .await
            .map_err(|_| PlaybackError::PlaybackFailed("Playback thread exited".into()))?
    }
}

/// Play to the end on the current thread, reporting once audio is queued
fn play_sync(path: PathBuf, started: oneshot::Sender<Result<(), PlaybackError>>) {
    let (_stream, sink) = match open(&path) {
        Ok(opened) => opened,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Playback failed to start");
            let _ = started.send(Err(e));
            return;
        }
    };

    let _ = started.send(Ok(()));
    sink.sleep_until_end();
    debug!(file = %path.display(), "Playback finished");
}

fn open(path: &Path) -> Result<(OutputStream, Sink), PlaybackError> {
    let file = File::open(path).map_err(|e| PlaybackError::FileMissing(e.to_string()))?;
    let source =
        Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::DecodeFailed(e.to_string()))?;

    let (stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
    let sink =
        Sink::try_new(&stream_handle).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;
    sink.append(source);

    Ok((stream, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let player = RodioPlayer::new();
        let err = player
            .play(&FileReference::new(dir.path().join("gone.flac")))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::FileMissing(_)));
    }

    #[tokio::test]
    async fn undecodable_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noise.flac");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let err = RodioPlayer::new()
            .play(&FileReference::new(path))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::DecodeFailed(_)));
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn plays_encoded_memo() {
        use crate::domain::recording::QualityPreset;
        use crate::infrastructure::audio::encode_to_flac;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.flac");
        let samples: Vec<i16> = (0..16_000)
            .map(|i| ((i as f32 * 0.17).sin() * 8000.0) as i16)
            .collect();
        std::fs::write(&path, encode_to_flac(&samples, QualityPreset::Low).unwrap()).unwrap();

        RodioPlayer::new()
            .play(&FileReference::new(path))
            .await
            .unwrap();
    }
}
