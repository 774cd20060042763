//! VoiceMemo - record, replay and organize voice memos
//!
//! A local sign-up / sign-in gate in front of a single-session voice
//! recorder with an editable list of recordings.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the recordings list, the capture session and forms
//! - **Application**: Use cases, the command dispatcher and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, FLAC, JSON/TOML files)
//! - **CLI**: Argument parsing, the interactive shell and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
