//! Microphone capture using cpal
//!
//! Each capture runs its own input stream on a dedicated thread, since
//! `cpal::Stream` is not `Send`. Samples are mixed down to mono as they
//! arrive and kept in memory at the device rate. On finalize they are
//! resampled to the preset rate and written out as FLAC.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

use super::flac_encoder::encode_to_flac;
use crate::application::ports::{
    AudioCapture, CaptureError, CaptureHandle, FinalizedCapture, PermissionStatus,
};
use crate::domain::recording::{AudioMode, Duration, FileReference, QualityPreset};

/// Capture adapter writing memos into `recordings_dir`
pub struct CpalCapture {
    recordings_dir: PathBuf,
}

impl CpalCapture {
    pub fn new(recordings_dir: impl Into<PathBuf>) -> Self {
        Self {
            recordings_dir: recordings_dir.into(),
        }
    }

    fn input_device() -> Result<cpal::Device, CaptureError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(CaptureError::NoAudioDevice)
    }

    /// Pick an input config, preferring mono and one that supports `target_rate`
    fn input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported = device
            .supported_input_configs()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let includes_target = |c: &cpal::SupportedStreamConfigRange| {
            c.min_sample_rate().0 <= target_rate && c.max_sample_rate().0 >= target_rate
        };

        let mut best: Option<cpal::SupportedStreamConfigRange> = None;
        for config in supported {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let is_better = match &best {
                None => true,
                Some(current) => {
                    config.channels() < current.channels()
                        || (includes_target(&config) && !includes_target(current))
                }
            };
            if is_better {
                best = Some(config);
            }
        }

        let range =
            best.ok_or_else(|| CaptureError::StartFailed("No suitable config found".into()))?;

        let sample_rate = if includes_target(&range) {
            SampleRate(target_rate)
        } else {
            range.min_sample_rate()
        };

        let config = StreamConfig {
            channels: range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };
        Ok((config, range.sample_format()))
    }

    fn next_file(&self) -> FileReference {
        let stamp = Utc::now().timestamp_millis();
        let mut path = self.recordings_dir.join(format!("memo-{}.flac", stamp));
        let mut n = 1;
        while path.exists() {
            path = self.recordings_dir.join(format!("memo-{}-{}.flac", stamp, n));
            n += 1;
        }
        FileReference::new(path)
    }

    fn probe_permission() -> PermissionStatus {
        // Desktop hosts have no prompt; a usable input device means access
        match Self::input_device() {
            Ok(_) => PermissionStatus::Granted,
            Err(_) => PermissionStatus::Denied,
        }
    }
}

/// State shared between a handle and its stream thread
struct Shared {
    buffer: StdMutex<Vec<i16>>,
    device_rate: AtomicU32,
    running: AtomicBool,
}

/// Run the input stream until `shared.running` is cleared
fn run_stream(
    shared: Arc<Shared>,
    target_rate: u32,
    started: oneshot::Sender<Result<(), CaptureError>>,
) {
    let stream = match open_stream(&shared, target_rate) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = started.send(Err(e));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = started.send(Err(CaptureError::StartFailed(e.to_string())));
        return;
    }
    let _ = started.send(Ok(()));

    while shared.running.load(Ordering::SeqCst) {
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    drop(stream);
}

fn open_stream(shared: &Arc<Shared>, target_rate: u32) -> Result<cpal::Stream, CaptureError> {
    let device = CpalCapture::input_device()?;
    let (config, sample_format) = CpalCapture::input_config(&device, target_rate)?;
    let channels = config.channels;
    shared.device_rate.store(config.sample_rate.0, Ordering::SeqCst);

    let on_error = |err: cpal::StreamError| error!(error = %err, "Audio stream error");

    let stream = match sample_format {
        SampleFormat::I16 => {
            let shared = Arc::clone(shared);
            device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if shared.running.load(Ordering::SeqCst) {
                        let mono = to_mono(data, channels);
                        if let Ok(mut buffer) = shared.buffer.lock() {
                            buffer.extend_from_slice(&mono);
                        }
                    }
                },
                on_error,
                None,
            )
        }
        SampleFormat::F32 => {
            let shared = Arc::clone(shared);
            device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if shared.running.load(Ordering::SeqCst) {
                        let pcm: Vec<i16> = data.iter().map(|&s| (s * 32767.0) as i16).collect();
                        let mono = to_mono(&pcm, channels);
                        if let Ok(mut buffer) = shared.buffer.lock() {
                            buffer.extend_from_slice(&mono);
                        }
                    }
                },
                on_error,
                None,
            )
        }
        _ => return Err(CaptureError::StartFailed("Unsupported sample format".into())),
    };

    stream.map_err(|e| CaptureError::StartFailed(e.to_string()))
}

/// Average interleaved channels down to mono
fn to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(usize::from(channels))
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
            (sum / i32::from(channels)) as i16
        })
        .collect()
}

/// Resample mono audio from `source_rate` to `target_rate`
fn resample(samples: &[i16], source_rate: u32, target_rate: u32) -> Result<Vec<i16>, CaptureError> {
    if source_rate == target_rate {
        return Ok(samples.to_vec());
    }

    let input: Vec<f32> = samples.iter().map(|&s| f32::from(s) / 32768.0).collect();
    let ratio = f64::from(target_rate) / f64::from(source_rate);
    let output_len = (input.len() as f64 * ratio).ceil() as usize;

    let mut resampler =
        FftFixedIn::<f32>::new(source_rate as usize, target_rate as usize, 1024, 2, 1)
            .map_err(|e| CaptureError::FinalizeFailed(format!("Resampler init failed: {}", e)))?;

    let mut output = Vec::with_capacity(output_len);
    let mut pos = 0;
    while pos < input.len() {
        let needed = resampler.input_frames_next();
        let end = (pos + needed).min(input.len());
        let mut chunk = input[pos..end].to_vec();
        chunk.resize(needed, 0.0);

        let frames = vec![chunk];
        let resampled = resampler
            .process(&frames, None)
            .map_err(|e| CaptureError::FinalizeFailed(format!("Resampling failed: {}", e)))?;
        output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
        pos = end;
    }

    output.truncate(output_len);
    Ok(output)
}

#[async_trait]
impl AudioCapture for CpalCapture {
    type Handle = CpalCaptureHandle;

    async fn permission_status(&self) -> PermissionStatus {
        tokio::task::spawn_blocking(Self::probe_permission)
            .await
            .unwrap_or(PermissionStatus::Denied)
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.permission_status().await
    }

    async fn begin_capture(
        &self,
        preset: QualityPreset,
        mode: AudioMode,
    ) -> Result<CpalCaptureHandle, CaptureError> {
        if !mode.allows_recording {
            return Err(CaptureError::StartFailed("Audio mode does not allow recording".into()));
        }

        tokio::fs::create_dir_all(&self.recordings_dir)
            .await
            .map_err(|e| {
                CaptureError::StartFailed(format!("Cannot create recordings dir: {}", e))
            })?;

        let shared = Arc::new(Shared {
            buffer: StdMutex::new(Vec::new()),
            device_rate: AtomicU32::new(0),
            running: AtomicBool::new(true),
        });

        let (started_tx, started_rx) = oneshot::channel();
        let thread_shared = Arc::clone(&shared);
        let target_rate = preset.sample_rate();
        let thread = std::thread::Builder::new()
            .name("memo-capture".into())
            .spawn(move || run_stream(thread_shared, target_rate, started_tx))
            .map_err(|e| CaptureError::StartFailed(e.to_string()))?;

        let started = started_rx
            .await
            .map_err(|_| CaptureError::StartFailed("Capture thread exited".into()));
        if let Err(e) = started.and_then(|r| r) {
            shared.running.store(false, Ordering::SeqCst);
            let _ = thread.join();
            return Err(e);
        }

        let file = self.next_file();
        debug!(
            file = %file,
            device_rate = shared.device_rate.load(Ordering::SeqCst),
            silent_mode = mode.plays_in_silent_mode,
            "Capture stream running"
        );

        Ok(CpalCaptureHandle {
            file,
            preset,
            shared,
            thread: Some(thread),
            started_at: Instant::now(),
        })
    }
}

/// A running cpal capture
pub struct CpalCaptureHandle {
    file: FileReference,
    preset: QualityPreset,
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
    started_at: Instant,
}

impl CpalCaptureHandle {
    /// Stop the stream thread and take the captured samples
    async fn stop(&mut self) -> Result<(Vec<i16>, u32), CaptureError> {
        self.shared.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            tokio::task::spawn_blocking(move || thread.join())
                .await
                .map_err(|e| CaptureError::FinalizeFailed(format!("Task join error: {}", e)))?
                .map_err(|_| CaptureError::FinalizeFailed("Capture thread panicked".into()))?;
        }

        let samples = match self.shared.buffer.lock() {
            Ok(mut buffer) => std::mem::take(&mut *buffer),
            Err(_) => return Err(CaptureError::FinalizeFailed("Sample buffer poisoned".into())),
        };
        Ok((samples, self.shared.device_rate.load(Ordering::SeqCst)))
    }
}

impl Drop for CpalCaptureHandle {
    fn drop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl CaptureHandle for CpalCaptureHandle {
    fn uri(&self) -> FileReference {
        self.file.clone()
    }

    fn elapsed(&self) -> Duration {
        self.started_at.elapsed().into()
    }

    async fn finalize(mut self) -> Result<FinalizedCapture, CaptureError> {
        let (samples, device_rate) = self.stop().await?;
        if samples.is_empty() || device_rate == 0 {
            warn!(file = %self.file, "Capture produced no audio");
            return Err(CaptureError::Empty);
        }

        let preset = self.preset;
        let path = self.file.path().to_path_buf();
        let frames = tokio::task::spawn_blocking(move || {
            let pcm = resample(&samples, device_rate, preset.sample_rate())?;
            let flac = encode_to_flac(&pcm, preset)
                .map_err(|e| CaptureError::FinalizeFailed(e.to_string()))?;
            std::fs::write(&path, flac).map_err(|e| CaptureError::WriteFailed(e.to_string()))?;
            Ok::<usize, CaptureError>(pcm.len())
        })
        .await
        .map_err(|e| CaptureError::FinalizeFailed(format!("Encode task error: {}", e)))??;

        let duration = Duration::from_frames(frames, preset.sample_rate());
        debug!(file = %self.file, frames, duration = %duration, "Capture finalized");
        Ok(FinalizedCapture {
            file: self.file.clone(),
            duration,
        })
    }

    async fn discard(mut self) -> Result<(), CaptureError> {
        let (samples, _) = self.stop().await?;
        debug!(file = %self.file, dropped = samples.len(), "Capture discarded");
        Ok(())
    }
}
