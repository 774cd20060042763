//! Capture session state machine

use std::fmt;
use thiserror::Error;

/// Capture states, without the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

impl CaptureState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: CaptureState,
    pub action: String,
}

/// At most one in-progress capture.
///
/// State machine:
///   IDLE -> CAPTURING (begin)
///   CAPTURING -> IDLE (finish, which hands the capture handle back)
#[derive(Debug)]
pub enum CaptureSession<H> {
    Idle,
    Capturing(H),
}

impl<H> Default for CaptureSession<H> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<H> CaptureSession<H> {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::Idle
    }

    /// Get the current state
    pub fn state(&self) -> CaptureState {
        match self {
            Self::Idle => CaptureState::Idle,
            Self::Capturing(_) => CaptureState::Capturing,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Capturing(_))
    }

    /// Borrow the active handle
    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Idle => None,
            Self::Capturing(handle) => Some(handle),
        }
    }

    /// Transition from IDLE to CAPTURING, taking ownership of `handle`.
    /// On failure the handle is returned alongside the error.
    pub fn begin(&mut self, handle: H) -> Result<(), (InvalidStateTransition, H)> {
        if self.is_capturing() {
            return Err((
                InvalidStateTransition {
                    current_state: self.state(),
                    action: "start capture".to_string(),
                },
                handle,
            ));
        }
        *self = Self::Capturing(handle);
        Ok(())
    }

    /// Transition from CAPTURING to IDLE, returning the handle
    pub fn finish(&mut self) -> Result<H, InvalidStateTransition> {
        match std::mem::replace(self, Self::Idle) {
            Self::Capturing(handle) => Ok(handle),
            Self::Idle => Err(InvalidStateTransition {
                current_state: CaptureState::Idle,
                action: "stop capture".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session: CaptureSession<u32> = CaptureSession::new();
        assert!(session.is_idle());
        assert!(!session.is_capturing());
        assert!(session.handle().is_none());
    }

    #[test]
    fn begin_from_idle() {
        let mut session = CaptureSession::new();
        assert!(session.begin(7).is_ok());
        assert!(session.is_capturing());
        assert_eq!(session.handle(), Some(&7));
    }

    #[test]
    fn begin_while_capturing_returns_handle() {
        let mut session = CaptureSession::new();
        session.begin(1).unwrap();

        let (err, rejected) = session.begin(2).unwrap_err();
        assert_eq!(err.current_state, CaptureState::Capturing);
        assert!(err.action.contains("start capture"));
        assert_eq!(rejected, 2);
        assert_eq!(session.handle(), Some(&1));
    }

    #[test]
    fn finish_returns_handle_and_idles() {
        let mut session = CaptureSession::new();
        session.begin("h").unwrap();

        assert_eq!(session.finish().unwrap(), "h");
        assert!(session.is_idle());
    }

    #[test]
    fn finish_from_idle_fails() {
        let mut session: CaptureSession<u8> = CaptureSession::new();
        let err = session.finish().unwrap_err();
        assert_eq!(err.current_state, CaptureState::Idle);
    }

    #[test]
    fn full_cycle() {
        let mut session = CaptureSession::new();
        session.begin(1).unwrap();
        session.finish().unwrap();
        // Can start another cycle
        session.begin(2).unwrap();
        assert_eq!(session.state(), CaptureState::Capturing);
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: CaptureState::Idle,
            action: "stop capture".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("stop capture"));
        assert!(msg.contains("idle"));
    }
}
