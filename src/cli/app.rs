//! Shell runner and config loading

use std::env;
use std::process::ExitCode;

use tokio::io::BufReader;
use tracing::{error, info, warn};

use crate::application::ports::{ConfigStore, KeyValueStore};
use crate::application::{AuthUseCase, Dispatcher, RecorderConfig, RecorderUseCase};
use crate::domain::config::AppConfig;
use crate::domain::recording::AudioMode;
use crate::infrastructure::{CpalCapture, JsonFileStore, MemoryStore, RodioPlayer, XdgConfigStore};

use super::args::ShellOptions;
use super::presenter::Presenter;
use super::shell::{Shell, ShellExit};
use super::signals::ShutdownListener;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding `data_dir`
pub const DATA_DIR_ENV: &str = "VOICE_MEMO_DATA_DIR";

/// Run the interactive shell on stdin
pub async fn run_shell(options: ShellOptions) -> ExitCode {
    let presenter = Presenter::new();

    let store: Box<dyn KeyValueStore> = if options.in_memory {
        Box::new(MemoryStore::new())
    } else {
        match JsonFileStore::open(&options.store_path).await {
            Ok(store) => Box::new(store),
            Err(e) => {
                presenter.error(&format!(
                    "Cannot open account store {}: {}",
                    options.store_path.display(),
                    e
                ));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };

    let mut shutdown = match ShutdownListener::new() {
        Ok(listener) => listener,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let recorder = RecorderUseCase::new(
        CpalCapture::new(&options.recordings_dir),
        RodioPlayer::new(),
        RecorderConfig {
            preset: options.quality,
            mode: AudioMode::capture(),
        },
    );
    let dispatcher = Dispatcher::new(recorder, AuthUseCase::new(store));
    let spinner = Presenter::follow_loading(dispatcher.auth().loading().subscribe(), "Working...");

    info!(
        quality = %options.quality,
        recordings = %options.recordings_dir.display(),
        in_memory = options.in_memory,
        "Shell starting"
    );

    let mut shell = Shell::new(dispatcher, presenter, options.confirm_clear);
    let result = shell
        .run(BufReader::new(tokio::io::stdin()), &mut shutdown)
        .await;

    // Dropping the dispatcher closes the loading channel and ends the spinner task
    drop(shell.into_dispatcher());
    let _ = spinner.await;

    match result {
        Ok(ShellExit::Quit | ShellExit::EndOfInput) => ExitCode::from(EXIT_SUCCESS),
        Ok(ShellExit::Signal(signal)) => {
            // A pending stdin read would otherwise hold the runtime open
            std::process::exit(i32::from(signal.exit_code()));
        }
        Err(e) => {
            error!(error = %e, "Reading input failed");
            Presenter::new().error(&format!("Reading input failed: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        data_dir: env::var(DATA_DIR_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Resolve the merged config into shell options
pub fn shell_options(config: &AppConfig, in_memory: bool) -> ShellOptions {
    ShellOptions {
        quality: config.quality_or_default(),
        store_path: config.store_path(),
        recordings_dir: config.recordings_dir_or_default(),
        in_memory,
        confirm_clear: config.confirm_clear_or_default(),
    }
}

/// Default config store location
pub fn config_store() -> XdgConfigStore {
    XdgConfigStore::new()
}
