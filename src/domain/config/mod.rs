//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, APP_DIR_NAME};
