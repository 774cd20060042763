//! Capture quality preset value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::QualityParseError;

/// All available quality presets
pub const ALL_PRESETS: &[QualityPreset] = &[QualityPreset::High, QualityPreset::Low];

/// Quality presets for audio capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityPreset {
    #[default]
    High,
    Low,
}

impl QualityPreset {
    /// Sample rate of the stored memo in Hz
    pub const fn sample_rate(&self) -> u32 {
        match self {
            Self::High => 44_100,
            Self::Low => 16_000,
        }
    }

    /// Channel count of the stored memo
    pub const fn channels(&self) -> u16 {
        1
    }

    /// Bits per stored sample
    pub const fn bits_per_sample(&self) -> u16 {
        16
    }

    /// Get the string identifier for this preset
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl FromStr for QualityPreset {
    type Err = QualityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            _ => Err(QualityParseError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform audio session settings applied before a capture begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    /// Recording is allowed while the mode is active
    pub allows_recording: bool,
    /// Playback keeps working when the device is in silent mode
    pub plays_in_silent_mode: bool,
}

impl AudioMode {
    /// Mode used for memo capture: record and keep playback audible in silent mode
    pub const fn capture() -> Self {
        Self {
            allows_recording: true,
            plays_in_silent_mode: true,
        }
    }
}

impl Default for AudioMode {
    fn default() -> Self {
        Self::capture()
    }
}
