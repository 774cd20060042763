//! Account domain module

mod form;
mod user;

pub use form::{is_valid_email, SignInForm, SignUpForm, ValidationError, MIN_PASSWORD_LEN};
pub use user::{UserAccount, SESSION_KEY, SESSION_MARKER};
