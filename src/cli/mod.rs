//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! the interactive shell and its runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod shell;
pub mod signals;

// Re-export commonly used types
pub use app::{run_shell, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ShellOptions};
pub use presenter::Presenter;
