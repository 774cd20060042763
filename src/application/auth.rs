//! Sign-up / sign-in use case over the key-value store

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::domain::account::{
    SignInForm, SignUpForm, UserAccount, ValidationError, SESSION_KEY, SESSION_MARKER,
};
use crate::domain::navigation::Route;

use super::ports::{KeyValueStore, StorageError};

/// Errors from the auth use case
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("User already exists")]
    AccountExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Observable "storage round-trip in progress" flag.
pub struct LoadingFlag {
    tx: watch::Sender<bool>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn is_loading(&self) -> bool {
        *self.tx.borrow()
    }

    /// Receiver that sees every change of the flag
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Raise the flag until the returned guard is dropped
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.tx.send_replace(true);
        LoadingGuard { tx: &self.tx }
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowers the loading flag on drop, on every exit path.
pub struct LoadingGuard<'a> {
    tx: &'a watch::Sender<bool>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tx.send_replace(false);
    }
}

/// Credential store flows
pub struct AuthUseCase<S: KeyValueStore> {
    store: S,
    loading: LoadingFlag,
}

impl<S: KeyValueStore> AuthUseCase<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            loading: LoadingFlag::new(),
        }
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Screen to skip to if a session marker is already stored
    pub async fn check_session(&self) -> Result<Option<Route>, AuthError> {
        let marker = self.store.get(SESSION_KEY).await?;
        if marker.is_some() {
            debug!("Existing session found");
            return Ok(Some(Route::Recording));
        }
        Ok(None)
    }

    /// Create an account. On success the next screen is sign-in.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Route, AuthError> {
        form.validate()?;

        let _loading = self.loading.begin();
        let account = UserAccount::new(form.email.clone(), form.password.clone());
        let record = serde_json::to_string(&account)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        let inserted = self
            .store
            .insert_if_absent(&account.email, &record)
            .await
            .map_err(|e| {
                error!(error = %e, "Sign up failed");
                e
            })?;
        if !inserted {
            info!(email = %account.email, "Sign up rejected: account exists");
            return Err(AuthError::AccountExists);
        }

        info!(email = %account.email, "Account created");
        Ok(Route::SignIn)
    }

    /// Check credentials and store the session marker. On success the next
    /// screen is the recorder.
    pub async fn sign_in(&self, form: &SignInForm) -> Result<Route, AuthError> {
        form.validate()?;

        let _loading = self.loading.begin();
        let record = self
            .store
            .get(&form.email)
            .await
            .map_err(|e| {
                error!(error = %e, "Sign in failed");
                e
            })?
            .ok_or(AuthError::UserNotFound)?;

        let account: UserAccount = serde_json::from_str(&record).map_err(|e| {
            error!(email = %form.email, error = %e, "Stored account is unreadable");
            StorageError::Corrupt(e.to_string())
        })?;

        if !account.password_matches(&form.password) {
            info!(email = %form.email, "Sign in rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.store.set(SESSION_KEY, SESSION_MARKER).await?;
        info!(email = %form.email, "Signed in");
        Ok(Route::Recording)
    }

    /// Remove the session marker
    pub async fn sign_out(&self) -> Result<Route, AuthError> {
        let _loading = self.loading.begin();
        self.store.remove(SESSION_KEY).await?;
        info!("Signed out");
        Ok(Route::Intro)
    }
}
