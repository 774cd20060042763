//! Sign-up and sign-in form validation

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern")
});

/// Check an address against `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Form validation failures. Each displays as its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingSignUpFields,

    #[error("Please fill in both fields")]
    MissingSignInFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password should be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Sign-up form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Checks run in order; the first failure is returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(ValidationError::MissingSignUpFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Sign-in form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingSignInFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "a@b", "@b.com", "a@.com.", "a b@c.com", "a@@b.com", "a@b.c om"] {
            assert!(!is_valid_email(bad), "accepted {:?}", bad);
        }
    }

    #[test]
    fn sign_up_valid() {
        assert_eq!(SignUpForm::new("a@b.com", "abcdef", "abcdef").validate(), Ok(()));
    }

    #[test]
    fn sign_up_missing_field() {
        assert_eq!(
            SignUpForm::new("a@b.com", "abcdef", "").validate(),
            Err(ValidationError::MissingSignUpFields)
        );
        assert_eq!(
            SignUpForm::new("", "abcdef", "abcdef").validate(),
            Err(ValidationError::MissingSignUpFields)
        );
    }

    #[test]
    fn sign_up_checks_run_in_order() {
        // Bad email wins over short and mismatched passwords
        assert_eq!(
            SignUpForm::new("nope", "abc", "xyz").validate(),
            Err(ValidationError::InvalidEmail)
        );
        // Short password wins over mismatch
        assert_eq!(
            SignUpForm::new("a@b.com", "abc", "xyz").validate(),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            SignUpForm::new("a@b.com", "abcdef", "abcdeg").validate(),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn password_length_counts_characters() {
        assert_eq!(
            SignUpForm::new("a@b.com", "ééééé", "ééééé").validate(),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(SignUpForm::new("a@b.com", "éééééé", "éééééé").validate(), Ok(()));
    }

    #[test]
    fn sign_in_validation() {
        assert_eq!(SignInForm::new("a@b.com", "x").validate(), Ok(()));
        assert_eq!(
            SignInForm::new("a@b.com", "").validate(),
            Err(ValidationError::MissingSignInFields)
        );
        assert_eq!(
            SignInForm::new("a.b.com", "x").validate(),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(ValidationError::MissingSignInFields.to_string(), "Please fill in both fields");
    }
}
