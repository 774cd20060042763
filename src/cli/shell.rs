//! Interactive line-oriented shell
//!
//! Each input line is one user action. Lines are parsed into dispatcher
//! commands; a few shell-only verbs (`list`, `help`, `quit`) are handled here.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::application::ports::{AudioCapture, AudioPlayer, KeyValueStore};
use crate::application::{Command, Dispatcher};
use crate::domain::account::{SignInForm, SignUpForm};
use crate::domain::navigation::{Route, UnknownRouteError};
use crate::domain::recording::RecordingsList;

use super::presenter::Presenter;
use super::signals::{ShutdownListener, ShutdownSignal};

pub const HELP: &str = "\
Screens:
  go <intro|signup|signin|Recording>   switch screen
Account:
  signup <email> <password> <confirm>  create an account
  signin <email> <password>            sign in
  signout                              forget the stored session
Recording:
  record | stop | cancel | toggle      control the microphone
  status                               show the current screen and capture time
  list                                 show recordings
  play <n> | delete <n>                replay or remove recording n
  rename <n>                           start renaming recording n
  name <text>                          set the new name
  save | discard                       finish or abandon the rename
  clear                                remove every recording
Shell:
  help | quit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Dispatch(Command),
    List,
    Status,
    /// Clear everything, confirming first if configured
    Clear,
    Help,
    Quit,
    Empty,
}

/// Problems with an input line
#[derive(Debug, Clone, Error)]
pub enum ShellParseError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("No recording #{number}; there are {len}")]
    NoSuchRecording { number: usize, len: usize },

    #[error(transparent)]
    Route(#[from] UnknownRouteError),
}

/// How the shell loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Quit,
    EndOfInput,
    Signal(ShutdownSignal),
}

/// Parse one line. Recording numbers are 1-based positions in `list`.
pub fn parse_line(line: &str, list: &RecordingsList) -> Result<ShellInput, ShellParseError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();
    let mut arg = || args.next().unwrap_or("").to_string();

    let input = match verb.to_lowercase().as_str() {
        "" => ShellInput::Empty,
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        "list" | "ls" => ShellInput::List,
        "status" => ShellInput::Status,
        "clear" => ShellInput::Clear,
        "go" => {
            if rest.is_empty() {
                return Err(ShellParseError::Usage("go <intro|signup|signin|Recording>"));
            }
            ShellInput::Dispatch(Command::Navigate(rest.parse::<Route>()?))
        }
        "signup" => {
            let (email, password, confirm) = (arg(), arg(), arg());
            ShellInput::Dispatch(Command::SignUp(SignUpForm::new(email, password, confirm)))
        }
        "signin" => {
            let (email, password) = (arg(), arg());
            ShellInput::Dispatch(Command::SignIn(SignInForm::new(email, password)))
        }
        "signout" => ShellInput::Dispatch(Command::SignOut),
        "record" | "start" => ShellInput::Dispatch(Command::StartRecording),
        "stop" => ShellInput::Dispatch(Command::StopRecording),
        "cancel" => ShellInput::Dispatch(Command::CancelRecording),
        "toggle" => ShellInput::Dispatch(Command::ToggleRecording),
        "play" => {
            let index = recording_index(rest, list, "play <n>")?;
            ShellInput::Dispatch(Command::Play(list.entries()[index].id))
        }
        "delete" | "rm" => {
            let index = recording_index(rest, list, "delete <n>")?;
            ShellInput::Dispatch(Command::Delete(list.entries()[index].id))
        }
        "rename" => {
            // Range is checked by the list itself
            let number = parse_number(rest, "rename <n>")?;
            ShellInput::Dispatch(Command::BeginRename(number - 1))
        }
        "name" => ShellInput::Dispatch(Command::EditName(rest.to_string())),
        "save" => ShellInput::Dispatch(Command::CommitRename),
        "discard" => ShellInput::Dispatch(Command::CancelRename),
        other => return Err(ShellParseError::UnknownCommand(other.to_string())),
    };
    Ok(input)
}

fn parse_number(text: &str, usage: &'static str) -> Result<usize, ShellParseError> {
    match text.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number),
        _ => Err(ShellParseError::Usage(usage)),
    }
}

fn recording_index(
    text: &str,
    list: &RecordingsList,
    usage: &'static str,
) -> Result<usize, ShellParseError> {
    let number = parse_number(text, usage)?;
    if number > list.len() {
        return Err(ShellParseError::NoSuchRecording {
            number,
            len: list.len(),
        });
    }
    Ok(number - 1)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// The interactive front end around a dispatcher
pub struct Shell<C, P, S>
where
    C: AudioCapture,
    P: AudioPlayer,
    S: KeyValueStore,
{
    dispatcher: Dispatcher<C, P, S>,
    presenter: Presenter,
    confirm_clear: bool,
}

impl<C, P, S> Shell<C, P, S>
where
    C: AudioCapture,
    P: AudioPlayer,
    S: KeyValueStore,
{
    pub fn new(dispatcher: Dispatcher<C, P, S>, presenter: Presenter, confirm_clear: bool) -> Self {
        Self {
            dispatcher,
            presenter,
            confirm_clear,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<C, P, S> {
        &self.dispatcher
    }

    /// Hand the dispatcher back, e.g. to drop it and end the loading watcher
    pub fn into_dispatcher(self) -> Dispatcher<C, P, S> {
        self.dispatcher
    }

    /// Read and run lines until `quit`, end of input or a shutdown signal.
    ///
    /// An active capture is discarded on the way out.
    pub async fn run<R>(
        &mut self,
        input: R,
        shutdown: &mut ShutdownListener,
    ) -> Result<ShellExit, std::io::Error>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.presenter.info(self.dispatcher.route().title());

        let exit = loop {
            self.presenter
                .prompt(self.dispatcher.route(), self.dispatcher.recorder().is_capturing());

            let line = tokio::select! {
                line = lines.next_line() => line?,
                signal = shutdown.recv() => break ShellExit::Signal(signal),
            };
            let Some(line) = line else {
                break ShellExit::EndOfInput;
            };

            let parsed = parse_line(&line, self.dispatcher.recorder().recordings());
            debug!(verb = line.split_whitespace().next().unwrap_or(""), "Shell input");
            match parsed {
                Ok(ShellInput::Empty) => {}
                Ok(ShellInput::Help) => self.presenter.output(HELP),
                Ok(ShellInput::Quit) => break ShellExit::Quit,
                Ok(ShellInput::List) => self
                    .presenter
                    .recordings(self.dispatcher.recorder().recordings()),
                Ok(ShellInput::Status) => self.show_status(),
                Ok(ShellInput::Clear) => {
                    if self.confirm_clear {
                        let count = self.dispatcher.recorder().recordings().len();
                        self.presenter.output_inline(&format!(
                            "Delete all {} recordings? [y/N] ",
                            count
                        ));
                        let answer = lines.next_line().await?.unwrap_or_default();
                        if !is_yes(&answer) {
                            self.presenter.info("Nothing deleted");
                            continue;
                        }
                    }
                    self.apply(Command::ClearAll).await;
                }
                Ok(ShellInput::Dispatch(command)) => self.apply(command).await,
                Err(e) => self.presenter.error(&e.to_string()),
            }
        };

        if self.dispatcher.recorder().is_capturing() {
            self.apply(Command::CancelRecording).await;
        }
        Ok(exit)
    }

    async fn apply(&mut self, command: Command) {
        let before = self.dispatcher.route();
        let was_capturing = self.dispatcher.recorder().is_capturing();
        let count_before = self.dispatcher.recorder().recordings().len();

        let saving = was_capturing
            && matches!(command, Command::StopRecording | Command::ToggleRecording);
        if saving {
            self.presenter.start_spinner("Saving recording");
        }
        let outcome = self.dispatcher.dispatch(command).await;
        if saving {
            self.presenter.stop_spinner();
        }

        if let Some(alert) = &outcome.alert {
            self.presenter.alert(alert);
        }

        let recorder = self.dispatcher.recorder();
        match (was_capturing, recorder.is_capturing()) {
            (false, true) => self.presenter.info("Recording..."),
            (true, false) if recorder.recordings().len() > count_before => {
                if let Some(entry) = recorder.recordings().entries().last() {
                    self.presenter.success(&format!("Saved {}", entry.display_line()));
                }
            }
            _ => {}
        }

        if outcome.route != before {
            self.presenter.info(outcome.route.title());
        }
    }

    fn show_status(&self) {
        let recorder = self.dispatcher.recorder();
        let route = self.dispatcher.route();
        if recorder.is_capturing() {
            self.presenter.output(&format!(
                "{} | {} | {}",
                route.title(),
                self.dispatcher.record_button_label(),
                recorder.elapsed()
            ));
        } else {
            self.presenter.output(&format!(
                "{} | {} | {} recordings",
                route.title(),
                self.dispatcher.record_button_label(),
                recorder.recordings().len()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::recorder::RecorderConfig;
    use crate::application::testing::{MockCapture, MockPlayer, MockStore};
    use crate::application::{AuthUseCase, RecorderUseCase};
    use crate::domain::recording::{Duration, FileReference, RecordingEntry, RecordingId};
    use chrono::Local;
    use tokio::sync::mpsc;

    fn list_of(n: u64) -> RecordingsList {
        let mut list = RecordingsList::new();
        for i in 1..=n {
            list.append(RecordingEntry {
                id: RecordingId::new(i * 10),
                name: RecordingEntry::default_name(i as usize),
                duration: Duration::from_secs(i),
                file: FileReference::new(format!("/tmp/{i}.flac")),
                created_at: Local::now(),
            });
        }
        list
    }

    fn shell(confirm_clear: bool) -> Shell<MockCapture, MockPlayer, MockStore> {
        let recorder = RecorderUseCase::new(
            MockCapture::granted(),
            MockPlayer::default(),
            RecorderConfig::default(),
        );
        let dispatcher = Dispatcher::new(recorder, AuthUseCase::new(MockStore::default()));
        Shell::new(dispatcher, Presenter::new(), confirm_clear)
    }

    fn quiet_listener() -> (mpsc::Sender<ShutdownSignal>, ShutdownListener) {
        let (tx, rx) = mpsc::channel(1);
        (tx, ShutdownListener::from_channel(rx))
    }

    #[test]
    fn parses_account_commands() {
        let list = RecordingsList::new();
        assert_eq!(
            parse_line("signup a@b.com abcdef abcdef", &list).unwrap(),
            ShellInput::Dispatch(Command::SignUp(SignUpForm::new("a@b.com", "abcdef", "abcdef")))
        );
        assert_eq!(
            parse_line("signin a@b.com", &list).unwrap(),
            ShellInput::Dispatch(Command::SignIn(SignInForm::new("a@b.com", "")))
        );
        assert_eq!(
            parse_line("  SIGNOUT ", &list).unwrap(),
            ShellInput::Dispatch(Command::SignOut)
        );
    }

    #[test]
    fn parses_navigation() {
        let list = RecordingsList::new();
        assert_eq!(
            parse_line("go recording", &list).unwrap(),
            ShellInput::Dispatch(Command::Navigate(Route::Recording))
        );
        assert!(matches!(
            parse_line("go nowhere", &list),
            Err(ShellParseError::Route(_))
        ));
        assert!(matches!(parse_line("go", &list), Err(ShellParseError::Usage(_))));
    }

    #[test]
    fn recording_numbers_resolve_to_ids() {
        let list = list_of(3);
        assert_eq!(
            parse_line("play 2", &list).unwrap(),
            ShellInput::Dispatch(Command::Play(RecordingId::new(20)))
        );
        assert_eq!(
            parse_line("delete 3", &list).unwrap(),
            ShellInput::Dispatch(Command::Delete(RecordingId::new(30)))
        );
        assert_eq!(
            parse_line("rename 1", &list).unwrap(),
            ShellInput::Dispatch(Command::BeginRename(0))
        );
    }

    #[test]
    fn bad_recording_numbers() {
        let list = list_of(1);
        assert!(matches!(
            parse_line("play 2", &list),
            Err(ShellParseError::NoSuchRecording { number: 2, len: 1 })
        ));
        assert!(matches!(parse_line("play 0", &list), Err(ShellParseError::Usage(_))));
        assert!(matches!(parse_line("delete x", &list), Err(ShellParseError::Usage(_))));
    }

    #[test]
    fn name_keeps_inner_spaces() {
        let list = RecordingsList::new();
        assert_eq!(
            parse_line("name  Team sync notes ", &list).unwrap(),
            ShellInput::Dispatch(Command::EditName("Team sync notes".into()))
        );
        assert_eq!(
            parse_line("name", &list).unwrap(),
            ShellInput::Dispatch(Command::EditName(String::new()))
        );
    }

    #[test]
    fn shell_verbs() {
        let list = RecordingsList::new();
        assert_eq!(parse_line("", &list).unwrap(), ShellInput::Empty);
        assert_eq!(parse_line("help", &list).unwrap(), ShellInput::Help);
        assert_eq!(parse_line("exit", &list).unwrap(), ShellInput::Quit);
        assert_eq!(parse_line("clear", &list).unwrap(), ShellInput::Clear);
        assert!(matches!(
            parse_line("dance", &list),
            Err(ShellParseError::UnknownCommand(_))
        ));
    }

    #[tokio::test]
    async fn scripted_session() {
        let mut shell = shell(false);
        let (_tx, mut listener) = quiet_listener();
        let script = "\
go signup
signup a@b.com abcdef abcdef
signin a@b.com abcdef
record
stop
record
stop
rename 2
name Standup
save
delete 1
quit
";
        let exit = shell.run(script.as_bytes(), &mut listener).await.unwrap();
        assert_eq!(exit, ShellExit::Quit);

        let dispatcher = shell.dispatcher();
        assert_eq!(dispatcher.route(), Route::Recording);
        let names: Vec<_> = dispatcher
            .recorder()
            .recordings()
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Standup"]);
    }

    #[tokio::test]
    async fn end_of_input_discards_capture() {
        let mut shell = shell(false);
        let (_tx, mut listener) = quiet_listener();

        let exit = shell.run("record\n".as_bytes(), &mut listener).await.unwrap();
        assert_eq!(exit, ShellExit::EndOfInput);
        assert!(!shell.dispatcher().recorder().is_capturing());
        assert!(shell.dispatcher().recorder().recordings().is_empty());
    }

    #[tokio::test]
    async fn confirm_clear_needs_yes() {
        let mut shell = shell(true);
        let (_tx, mut listener) = quiet_listener();

        shell
            .run("record\nstop\nclear\nn\n".as_bytes(), &mut listener)
            .await
            .unwrap();
        assert_eq!(shell.dispatcher().recorder().recordings().len(), 1);

        shell.run("clear\nyes\n".as_bytes(), &mut listener).await.unwrap();
        assert!(shell.dispatcher().recorder().recordings().is_empty());
    }

    #[tokio::test]
    async fn signal_stops_loop() {
        let mut shell = shell(false);
        let (tx, mut listener) = quiet_listener();
        tx.send(ShutdownSignal::Interrupt).await.unwrap();

        // Input that never ends
        let (_writer, reader) = tokio::io::duplex(64);
        let exit = shell
            .run(tokio::io::BufReader::new(reader), &mut listener)
            .await
            .unwrap();
        assert_eq!(exit, ShellExit::Signal(ShutdownSignal::Interrupt));
    }
}
