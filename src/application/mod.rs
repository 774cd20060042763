//! Application layer - Use cases and port interfaces
//!
//! Contains the core operations and trait definitions
//! for external system interactions.

pub mod auth;
pub mod dispatcher;
pub mod ports;
pub mod recorder;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use auth::{AuthError, AuthUseCase, LoadingFlag, LoadingGuard};
pub use dispatcher::{Alert, Command, Dispatcher, Outcome};
pub use recorder::{RecorderConfig, RecorderError, RecorderUseCase, StartOutcome, ToggleOutcome};
