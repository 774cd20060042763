//! Capture session domain module

mod capture;

pub use capture::{CaptureSession, CaptureState, InvalidStateTransition};
