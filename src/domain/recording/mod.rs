//! Recording domain module

mod duration;
mod entry;
mod list;
mod quality;

pub use duration::Duration;
pub use entry::{FileReference, RecordingEntry, RecordingId};
pub use list::{ListError, RecordingsList};
pub use quality::{AudioMode, QualityPreset, ALL_PRESETS};
