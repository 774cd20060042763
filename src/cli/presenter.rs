//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::Alert;
use crate::domain::navigation::Route;
use crate::domain::recording::RecordingsList;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        self.spinner = Some(new_spinner(message));
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Show a spinner whenever `loading` is raised.
    ///
    /// Runs until the sending side is dropped.
    pub fn follow_loading(mut loading: watch::Receiver<bool>, message: &str) -> JoinHandle<()> {
        let message = message.to_string();
        tokio::spawn(async move {
            let mut spinner: Option<ProgressBar> = None;
            while loading.changed().await.is_ok() {
                let active = *loading.borrow_and_update();
                match (active, spinner.take()) {
                    (true, None) => spinner = Some(new_spinner(&message)),
                    (true, Some(running)) => spinner = Some(running),
                    (false, Some(running)) => running.finish_and_clear(),
                    (false, None) => {}
                }
            }
            if let Some(running) = spinner {
                running.finish_and_clear();
            }
        })
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Show a blocking alert. Success titles render green.
    pub fn alert(&self, alert: &Alert) {
        let text = match &alert.message {
            Some(message) => format!("{}: {}", alert.title.bold(), message),
            None => alert.title.bold().to_string(),
        };
        if alert.is_success() {
            self.success(&text);
        } else {
            self.error(&text);
        }
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout without newline
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Shell prompt for the current screen
    pub fn prompt(&self, route: Route, recording: bool) {
        let marker = if recording {
            format!(" {}", "●REC".red())
        } else {
            String::new()
        };
        print!("{}{}> ", route.as_str().cyan(), marker);
        let _ = io::stdout().flush();
    }

    /// Print the recordings list, 1-based, marking the row being renamed
    pub fn recordings(&self, list: &RecordingsList) {
        if list.is_empty() {
            self.output("No recordings yet");
            return;
        }

        let editing = list.edit_state();
        for (index, entry) in list.entries().iter().enumerate() {
            match editing {
                Some((edit_index, buffer)) if edit_index == index => println!(
                    "{:>3}. {} {} | {}",
                    index + 1,
                    "✎".yellow(),
                    buffer,
                    entry.duration
                ),
                _ => println!("{:>3}. {}", index + 1, entry.display_line()),
            }
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
