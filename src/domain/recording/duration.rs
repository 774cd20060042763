//! Duration value object

use std::fmt;
use std::time::Duration as StdDuration;

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;

/// Length of a captured memo.
/// Immutable, millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * MILLIS_PER_SECOND,
        }
    }

    /// Duration of `frames` samples at `sample_rate` Hz
    pub fn from_frames(frames: usize, sample_rate: u32) -> Self {
        if sample_rate == 0 {
            return Self::default();
        }
        Self::from_millis(frames as u64 * MILLIS_PER_SECOND / u64::from(sample_rate))
    }

    /// Get duration in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / MILLIS_PER_SECOND
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    /// Clock-style `(minutes, seconds)` pair.
    ///
    /// Minutes are floored from the total; seconds are the remainder rounded to
    /// the nearest second. A remainder that rounds up to 60 carries into the
    /// minutes so the seconds field always stays within `0..=59`.
    pub const fn clock(&self) -> (u64, u64) {
        let mut minutes = self.milliseconds / MILLIS_PER_MINUTE;
        let remainder = self.milliseconds % MILLIS_PER_MINUTE;
        let mut seconds = (remainder + MILLIS_PER_SECOND / 2) / MILLIS_PER_SECOND;
        if seconds == 60 {
            minutes += 1;
            seconds = 0;
        }
        (minutes, seconds)
    }
}

impl From<StdDuration> for Duration {
    fn from(d: StdDuration) -> Self {
        Self::from_millis(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Formats as `M:SS`, e.g. `1:05` or `10:00`.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (minutes, seconds) = self.clock();
        write!(f, "{}:{:02}", minutes, seconds)
    }
}
