//! Configuration port interface

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted settings file
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read settings; a missing file yields an empty config
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings with `config`
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the settings file
    fn path(&self) -> &Path;

    fn exists(&self) -> bool;

    /// Write the defaults. Fails with `AlreadyExists` if the file is present.
    async fn init(&self) -> Result<(), ConfigError>;
}
