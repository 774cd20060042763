//! VoiceMemo CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_memo::cli::{
    app::{config_store, load_merged_config, run_shell, shell_options, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voice_memo::domain::config::AppConfig;
use voice_memo::domain::error::ConfigError;
use voice_memo::domain::recording::QualityPreset;
use voice_memo::logging::{init_logging, Verbosity};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose, cli.quiet));
    let presenter = Presenter::new();
    let store = config_store();

    if let Some(Commands::Config { action }) = cli.command {
        return match handle_config_command(action, &store, &presenter).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e @ ConfigError::ValidationError { .. }) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_USAGE_ERROR)
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let cli_config = AppConfig {
        data_dir: cli.data_dir.clone(),
        recordings_dir: cli.recordings_dir.clone(),
        quality: cli
            .quality
            .map(|q| QualityPreset::from(q).as_str().to_string()),
        confirm_clear: None,
    };
    let config = load_merged_config(&store, cli_config).await;

    run_shell(shell_options(&config, cli.memory)).await
}
