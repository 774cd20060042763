//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::recording::QualityPreset;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => {
            store.init().await?;
            presenter.success(&format!("Config file created at: {}", store.path().display()));
            Ok(())
        }
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => {
            check_key(&key)?;
            let config = store.load().await?;
            presenter.output(value_of(&config, &key).as_deref().unwrap_or(NOT_SET));
            Ok(())
        }
        ConfigAction::List => {
            let config = store.load().await?;
            for key in VALID_CONFIG_KEYS {
                presenter.key_value(key, value_of(&config, key).as_deref().unwrap_or(NOT_SET));
            }
            Ok(())
        }
        ConfigAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    match key {
        "data_dir" => config.data_dir = Some(non_empty(key, value)?),
        "recordings_dir" => config.recordings_dir = Some(non_empty(key, value)?),
        "quality" => {
            let preset = value.parse::<QualityPreset>().map_err(|e| {
                ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;
            config.quality = Some(preset.as_str().to_string());
        }
        "confirm_clear" => {
            config.confirm_clear = Some(parse_bool(value).ok_or_else(|| {
                ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be 'true' or 'false'".to_string(),
                }
            })?)
        }
        _ => unreachable!("key validated above"),
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn value_of(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "data_dir" => config.data_dir.clone(),
        "recordings_dir" => config.recordings_dir.clone(),
        "quality" => config.quality.clone(),
        "confirm_clear" => config.confirm_clear.map(|b| b.to_string()),
        _ => None,
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must not be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
