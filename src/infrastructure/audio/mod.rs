//! Audio adapters
//!
//! Capture goes through cpal and is stored as FLAC; playback goes through
//! rodio.

mod cpal_capture;
mod flac_encoder;
mod rodio_player;

pub use cpal_capture::{CpalCapture, CpalCaptureHandle};
pub use flac_encoder::{encode_to_flac, EncodingError};
pub use rodio_player::RodioPlayer;
