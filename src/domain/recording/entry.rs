//! Recording entry entity

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::Duration;

/// Unique identifier of a recording: its creation time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordingId(u64);

impl RecordingId {
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a captured audio asset on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference(PathBuf);

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A finished voice memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingEntry {
    pub id: RecordingId,
    pub name: String,
    pub duration: Duration,
    pub file: FileReference,
    pub created_at: DateTime<Local>,
}

impl RecordingEntry {
    /// Default display name for the memo at 1-based `position`
    pub fn default_name(position: usize) -> String {
        format!("Recording #{}", position)
    }

    /// One-line listing: `name | M:SS | local timestamp`
    pub fn display_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.name,
            self.duration,
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
