//! Named screens of the app

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// All routes, in the order the screens are registered
pub const ALL_ROUTES: &[Route] = &[Route::Intro, Route::SignUp, Route::SignIn, Route::Recording];

/// Error when a route name is not registered
#[derive(Debug, Clone, Error)]
#[error("Unknown route: \"{input}\". Valid routes are: intro, signup, signin, Recording")]
pub struct UnknownRouteError {
    pub input: String,
}

/// Screen the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Intro,
    SignUp,
    SignIn,
    Recording,
}

impl Route {
    /// Registered route name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::SignUp => "signup",
            Self::SignIn => "signin",
            Self::Recording => "Recording",
        }
    }

    /// Screen title
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Intro => "Welcome to the App",
            Self::SignUp => "Sign Up",
            Self::SignIn => "Sign In",
            Self::Recording => "Voice Recorder",
        }
    }
}

impl FromStr for Route {
    type Err = UnknownRouteError;

    /// Route names match case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ALL_ROUTES
            .iter()
            .copied()
            .find(|route| route.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownRouteError { input: s.to_string() })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registered_names() {
        assert_eq!("intro".parse::<Route>().unwrap(), Route::Intro);
        assert_eq!("signup".parse::<Route>().unwrap(), Route::SignUp);
        assert_eq!("signin".parse::<Route>().unwrap(), Route::SignIn);
        assert_eq!("Recording".parse::<Route>().unwrap(), Route::Recording);
        assert_eq!("recording".parse::<Route>().unwrap(), Route::Recording);
    }

    #[test]
    fn rejects_unknown() {
        assert!("ForgotPassword".parse::<Route>().is_err());
    }

    #[test]
    fn default_is_intro() {
        assert_eq!(Route::default(), Route::Intro);
        assert_eq!(Route::Recording.to_string(), "Recording");
    }
}
