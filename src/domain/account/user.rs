//! Stored user account

use serde::{Deserialize, Serialize};

/// Store key of the signed-in marker. Account keys are emails and always
/// contain `@`, so this key never collides with one.
pub const SESSION_KEY: &str = "userToken";

/// Value written under [`SESSION_KEY`]. Its presence alone means "signed in".
pub const SESSION_MARKER: &str = "signed-in";

/// Account record, stored as JSON under its email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub password: String,
}

impl UserAccount {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Plain equality against the stored password
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
