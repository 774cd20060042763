//! Single-threaded command dispatcher
//!
//! Every user action is a [`Command`]. The dispatcher runs each one to
//! completion before accepting the next and reports what the user should see
//! as an [`Outcome`].

use tracing::{debug, error, warn};

use crate::domain::account::{SignInForm, SignUpForm};
use crate::domain::navigation::Route;
use crate::domain::recording::RecordingId;

use super::auth::{AuthError, AuthUseCase};
use super::ports::{AudioCapture, AudioPlayer, KeyValueStore};
use super::recorder::{RecorderError, RecorderUseCase};

/// Message shown for failures the user cannot act on
pub const GENERIC_FAILURE: &str = "Something went wrong.";

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(Route),
    CheckSession,
    SignUp(SignUpForm),
    SignIn(SignInForm),
    SignOut,
    ToggleRecording,
    StartRecording,
    StopRecording,
    CancelRecording,
    Play(RecordingId),
    Delete(RecordingId),
    BeginRename(usize),
    EditName(String),
    CommitRename,
    CancelRename,
    ClearAll,
}

/// Blocking message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: Option<String>,
}

impl Alert {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
        }
    }

    pub fn with_message(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: Some(message.into()),
        }
    }

    /// Success alerts are titled with a trailing '!'
    pub fn is_success(&self) -> bool {
        self.title.ends_with('!')
    }
}

/// Which auth flow produced an error; picks the generic failure title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    SignUp,
    SignIn,
    SignOut,
}

impl AuthFlow {
    const fn failure_title(&self) -> &'static str {
        match self {
            Self::SignUp => "Sign Up Failed",
            Self::SignIn => "Sign In Failed",
            Self::SignOut => "Sign Out Failed",
        }
    }
}

impl Alert {
    /// User-facing alert for an auth error
    pub fn from_auth(err: &AuthError, flow: AuthFlow) -> Self {
        match err {
            AuthError::Validation(v) => Self::new(v.to_string()),
            AuthError::AccountExists => {
                Self::with_message("User already exists", "Please use another email.")
            }
            AuthError::UserNotFound => {
                Self::with_message("User not found", "Please sign up first.")
            }
            AuthError::InvalidCredentials => {
                Self::with_message("Invalid credentials", "Incorrect password.")
            }
            AuthError::Storage(_) => Self::with_message(flow.failure_title(), GENERIC_FAILURE),
        }
    }
}

impl From<&RecorderError> for Alert {
    fn from(err: &RecorderError) -> Self {
        match err {
            RecorderError::AlreadyCapturing => Self::new("A recording is already in progress"),
            RecorderError::InvalidState(_) => Self::new("No recording in progress"),
            RecorderError::List(e) => Self::new(e.to_string()),
            RecorderError::Capture(_) => Self::with_message("Recording Failed", GENERIC_FAILURE),
            RecorderError::Playback(_) => Self::with_message("Playback Failed", GENERIC_FAILURE),
        }
    }
}

/// Result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub alert: Option<Alert>,
    /// Screen shown after the command
    pub route: Route,
}

/// Owns the app state and applies commands in order
pub struct Dispatcher<C, P, S>
where
    C: AudioCapture,
    P: AudioPlayer,
    S: KeyValueStore,
{
    recorder: RecorderUseCase<C, P>,
    auth: AuthUseCase<S>,
    route: Route,
}

impl<C, P, S> Dispatcher<C, P, S>
where
    C: AudioCapture,
    P: AudioPlayer,
    S: KeyValueStore,
{
    /// Start on the intro screen
    pub fn new(recorder: RecorderUseCase<C, P>, auth: AuthUseCase<S>) -> Self {
        Self {
            recorder,
            auth,
            route: Route::Intro,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn recorder(&self) -> &RecorderUseCase<C, P> {
        &self.recorder
    }

    pub fn auth(&self) -> &AuthUseCase<S> {
        &self.auth
    }

    /// Apply one command
    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        let alert = match command {
            Command::Navigate(route) => self.navigate(route).await,
            Command::CheckSession => self.check_session().await,
            Command::SignUp(form) => match self.auth.sign_up(&form).await {
                Ok(route) => {
                    let success =
                        Alert::with_message("Sign Up Successful!", "You can now sign in.");
                    self.navigate(route).await.or(Some(success))
                }
                Err(e) => Some(Alert::from_auth(&e, AuthFlow::SignUp)),
            },
            Command::SignIn(form) => match self.auth.sign_in(&form).await {
                Ok(route) => {
                    self.route = route;
                    Some(Alert::new("Sign In Successful!"))
                }
                Err(e) => Some(Alert::from_auth(&e, AuthFlow::SignIn)),
            },
            Command::SignOut => match self.auth.sign_out().await {
                Ok(route) => {
                    self.route = route;
                    None
                }
                Err(e) => Some(Alert::from_auth(&e, AuthFlow::SignOut)),
            },
            Command::ToggleRecording => self.recorder.toggle().await.err().map(|e| Alert::from(&e)),
            Command::StartRecording => {
                self.recorder.start_capture().await.err().map(|e| Alert::from(&e))
            }
            Command::StopRecording => {
                self.recorder.stop_capture().await.err().map(|e| Alert::from(&e))
            }
            Command::CancelRecording => {
                self.recorder.cancel_capture().await.err().map(|e| Alert::from(&e))
            }
            Command::Play(id) => self.recorder.play(id).await.err().map(|e| Alert::from(&e)),
            Command::Delete(id) => {
                self.recorder.delete(id);
                None
            }
            Command::BeginRename(index) => {
                self.recorder.begin_rename(index).err().map(|e| Alert::from(&e))
            }
            Command::EditName(text) => {
                self.recorder.edit_name(text);
                None
            }
            Command::CommitRename => {
                self.recorder.commit_rename();
                None
            }
            Command::CancelRename => {
                self.recorder.cancel_rename();
                None
            }
            Command::ClearAll => {
                self.recorder.clear_all();
                None
            }
        };

        match alert {
            Some(ref a) if a.is_success() => debug!(title = %a.title, "Alert raised"),
            Some(ref a) => warn!(title = %a.title, "Alert raised"),
            None => {}
        }

        Outcome {
            alert,
            route: self.route,
        }
    }

    /// Switch screens. Arriving at sign-in runs the stored-session check.
    async fn navigate(&mut self, route: Route) -> Option<Alert> {
        self.route = route;
        if route == Route::SignIn {
            return self.check_session().await;
        }
        None
    }

    async fn check_session(&mut self) -> Option<Alert> {
        match self.auth.check_session().await {
            Ok(Some(route)) => {
                self.route = route;
                None
            }
            Ok(None) => None,
            Err(e) => {
                error!(error = %e, "Session check failed");
                None
            }
        }
    }

    /// Whether a toggle would start or stop, for the record button label
    pub fn record_button_label(&self) -> &'static str {
        if self.recorder.is_capturing() {
            "Stop Recording"
        } else {
            "Start Recording"
        }
    }
}
