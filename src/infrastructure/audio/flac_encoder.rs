//! FLAC encoding for finished memos
//!
//! Memos are stored losslessly as mono 16-bit FLAC at the rate of the
//! selected quality preset.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;

use crate::domain::recording::QualityPreset;

/// FLAC encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("FLAC write failed: {0}")]
    Write(String),
}

/// Encode mono PCM samples, already at the preset's rate, to FLAC bytes
pub fn encode_to_flac(
    pcm_samples: &[i16],
    preset: QualityPreset,
) -> Result<Vec<u8>, EncodingError> {
    let samples_i32: Vec<i32> = pcm_samples.iter().map(|&s| i32::from(s)).collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodingError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples_i32,
        usize::from(preset.channels()),
        usize::from(preset.bits_per_sample()),
        preset.sample_rate() as usize,
    );

    let flac_stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| EncodingError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    flac_stream
        .write(&mut sink)
        .map_err(|e| EncodingError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}
