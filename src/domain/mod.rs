//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod account;
pub mod config;
pub mod error;
pub mod navigation;
pub mod recording;
pub mod session;

// Re-export common types
pub use account::{SignInForm, SignUpForm, UserAccount, ValidationError};
pub use config::AppConfig;
pub use error::*;
pub use navigation::Route;
pub use recording::{Duration, QualityPreset, RecordingEntry, RecordingId, RecordingsList};
pub use session::{CaptureSession, CaptureState};
