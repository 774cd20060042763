//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::recording::QualityPreset;

/// Voice memo recorder with a local sign-in gate
#[derive(Parser, Debug)]
#[command(name = "voice-memo")]
#[command(version)]
#[command(about = "Record, replay and organize voice memos from the terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Capture quality preset
    #[arg(short = 'Q', long, value_name = "PRESET")]
    pub quality: Option<QualityArg>,

    /// Directory for the account store and recordings
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Directory for recorded memos (defaults to <data-dir>/recordings)
    #[arg(long, value_name = "DIR")]
    pub recordings_dir: Option<String>,

    /// Keep accounts in memory only
    #[arg(long)]
    pub memory: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Quality argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum QualityArg {
    High,
    Low,
}

impl From<QualityArg> for QualityPreset {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::High => QualityPreset::High,
            QualityArg::Low => QualityPreset::Low,
        }
    }
}

/// Options the shell runs with after config merging
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub quality: QualityPreset,
    pub store_path: std::path::PathBuf,
    pub recordings_dir: std::path::PathBuf,
    pub in_memory: bool,
    pub confirm_clear: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["data_dir", "recordings_dir", "quality", "confirm_clear"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
