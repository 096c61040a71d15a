//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthContext` is the single owner of "is someone signed in, and who". It is
//! constructed once in `App`, provided via Leptos context, and every session
//! mutation goes through its operations. Route guards and user-aware
//! components read the published [`AuthState`] snapshot.
//!
//! CONCURRENCY
//! ===========
//! Operations that mutate the session (`check_auth`, `login`, `register`,
//! `logout`, `delete_account`) take turns on an async FIFO lock, so a logout
//! racing a delete-account completes one after the other and the last to
//! finish decides the final state.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::lock::Mutex as AsyncMutex;
use routing::Route;

use super::notice::{Notice, Notifier};
use super::session::SessionStore;
use crate::net::api::{ApiError, ContactApi};
use crate::net::types::{AuthResponse, Credentials, Registration, User};
use crate::util::navigation::Navigator;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";
pub const LOGOUT_FAILED_MESSAGE: &str = "Logout request failed; you have been signed out locally.";
pub const NOT_SIGNED_IN_MESSAGE: &str = "You are not signed in.";
pub const ACCOUNT_DELETED_MESSAGE: &str = "Your account has been deleted.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete account";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
pub const SESSION_STORAGE_FAILED_MESSAGE: &str = "Could not save your session. Check that site storage is enabled.";
pub const FORGOT_PASSWORD_FAILED_MESSAGE: &str = "Failed to send reset instructions";
pub const RESET_PASSWORD_FAILED_MESSAGE: &str = "Failed to reset password";

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Starts loading: nothing is known until the first `check_auth`.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

/// Result of `login`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure(String),
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of `register`. Backends that do not sign the new user in return no
/// token, which leaves the session untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    SignedIn,
    Registered,
    Failure(String),
}

type Observer = Arc<dyn Fn(&AuthState) + Send + Sync>;

struct Inner {
    api: Arc<dyn ContactApi>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<AuthState>,
    observer: Mutex<Option<Observer>>,
    turns: AsyncMutex<()>,
}

/// Owned session object. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<Inner>,
}

impl AuthContext {
    pub fn new(
        api: Arc<dyn ContactApi>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                session,
                navigator,
                notifier,
                state: Mutex::new(AuthState::default()),
                observer: Mutex::new(None),
                turns: AsyncMutex::new(()),
            }),
        }
    }

    /// Publish every state change to `observer` (the UI's reactive signal).
    /// The current state is delivered immediately.
    pub fn observe(&self, observer: impl Fn(&AuthState) + Send + Sync + 'static) {
        let observer: Observer = Arc::new(observer);
        observer(&self.state());
        *self.inner.observer.lock().unwrap_or_else(PoisonError::into_inner) = Some(observer);
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.lock_state().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock_state().user.clone()
    }

    /// Current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.session.get()
    }

    // =========================================================================
    // SESSION OPERATIONS
    // =========================================================================

    /// Verify the stored token and load the user, or drop the session.
    ///
    /// Loading is always cleared when this returns.
    pub async fn check_auth(&self) {
        let _turn = self.inner.turns.lock().await;
        let route = Route::classify(&self.inner.navigator.current_path());

        let Some(token) = self.inner.session.get() else {
            // A cookie without a stored token would bounce the guard back here.
            self.inner.session.clear();
            self.update(|state| {
                state.user = None;
                state.loading = false;
            });
            if !route.is_public_auth() {
                self.redirect(Route::Login);
            }
            return;
        };

        match self.inner.api.verify_token(&token).await {
            Ok(user) => {
                self.inner.session.sync_cookie();
                self.update(|state| {
                    state.user = Some(user);
                    state.loading = false;
                });
                if route == Route::Login {
                    self.redirect(Route::Dashboard);
                }
            }
            Err(err) => {
                log::warn!("token verification failed: {err}");
                self.end_session();
                self.redirect(Route::Login);
            }
        }
    }

    /// Sign in with email + password. Emits no notices; the caller decides
    /// what to show.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let _turn = self.inner.turns.lock().await;
        let response = self.inner.api.login(credentials).await;
        match self.establish(response, LOGIN_FAILED_MESSAGE).await {
            Ok(true) => AuthOutcome::Success,
            Ok(false) => AuthOutcome::Failure(LOGIN_FAILED_MESSAGE.to_owned()),
            Err(message) => AuthOutcome::Failure(message),
        }
    }

    /// Create an account. Signs the user in when the backend returns a token.
    pub async fn register(&self, registration: &Registration) -> RegisterOutcome {
        let _turn = self.inner.turns.lock().await;
        let response = self.inner.api.register(registration).await;
        match self.establish(response, REGISTER_FAILED_MESSAGE).await {
            Ok(true) => RegisterOutcome::SignedIn,
            Ok(false) => RegisterOutcome::Registered,
            Err(message) => RegisterOutcome::Failure(message),
        }
    }

    /// Sign out. The local session is always cleared, even when the server
    /// call fails.
    pub async fn logout(&self) {
        let _turn = self.inner.turns.lock().await;
        self.update(|state| state.loading = true);

        if let Some(token) = self.inner.session.get() {
            match self.inner.api.logout(&token).await {
                Ok(()) => {}
                Err(err @ ApiError::Transport(_)) => {
                    log::warn!("logout request failed: {err}");
                    self.notify(Notice::error(LOGOUT_FAILED_MESSAGE));
                }
                Err(err) => log::info!("logout rejected by server: {err}"),
            }
        }

        self.end_session();
        self.redirect(Route::Login);
    }

    /// Delete the signed-in account. The session is cleared only after the
    /// server confirms.
    pub async fn delete_account(&self, password: &str) -> bool {
        let _turn = self.inner.turns.lock().await;
        let Some(token) = self.inner.session.get() else {
            self.notify(Notice::error(NOT_SIGNED_IN_MESSAGE));
            return false;
        };

        match self.inner.api.delete_account(&token, password).await {
            Ok(()) => {
                self.notify(Notice::success(ACCOUNT_DELETED_MESSAGE));
                self.end_session();
                self.redirect(Route::Login);
                true
            }
            Err(err) => {
                log::warn!("delete account failed: {err}");
                self.notify(Notice::error(err.user_message(DELETE_FAILED_MESSAGE)));
                false
            }
        }
    }

    // =========================================================================
    // PASSWORD RESET
    // =========================================================================

    /// Ask the backend to email reset instructions.
    ///
    /// # Errors
    ///
    /// Returns the message to display when the request is rejected or fails.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), String> {
        self.inner
            .api
            .forgot_password(email)
            .await
            .map_err(|err| err.user_message(FORGOT_PASSWORD_FAILED_MESSAGE))
    }

    /// Set a new password using the emailed reset token.
    ///
    /// # Errors
    ///
    /// Returns the message to display when the request is rejected or fails.
    pub async fn reset_password(&self, reset_token: &str, password: &str) -> Result<(), String> {
        self.inner
            .api
            .reset_password(reset_token, password)
            .await
            .map_err(|err| err.user_message(RESET_PASSWORD_FAILED_MESSAGE))
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    pub(crate) fn api(&self) -> &dyn ContactApi {
        self.inner.api.as_ref()
    }

    /// Store the token and user from a login/register response.
    ///
    /// `Ok(false)` means the response carried no token.
    async fn establish(&self, response: Result<AuthResponse, ApiError>, fallback: &str) -> Result<bool, String> {
        let body = response.map_err(|err| {
            log::warn!("authentication request failed: {err}");
            err.user_message(fallback)
        })?;
        let Some(token) = body.token.filter(|token| !token.is_empty()) else {
            return Ok(false);
        };
        let user = match body.user {
            Some(user) => user,
            None => self
                .inner
                .api
                .verify_token(&token)
                .await
                .map_err(|err| err.user_message(fallback))?,
        };
        self.inner.session.set(&token).map_err(|err| {
            log::warn!("could not persist session token: {err}");
            SESSION_STORAGE_FAILED_MESSAGE.to_owned()
        })?;
        self.update(|state| {
            state.user = Some(user);
            state.loading = false;
        });
        Ok(true)
    }

    /// Called when an authenticated call comes back `401`.
    pub(crate) async fn expire_session(&self) {
        let _turn = self.inner.turns.lock().await;
        if self.inner.session.get().is_none() && self.lock_state().user.is_none() {
            return;
        }
        self.end_session();
        self.notify(Notice::error(SESSION_EXPIRED_MESSAGE));
        self.redirect(Route::Login);
    }

    fn end_session(&self) {
        self.inner.session.clear();
        self.update(|state| {
            state.user = None;
            state.loading = false;
        });
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.inner.notifier.notify(notice);
    }

    fn redirect(&self, route: Route) {
        if let Some(path) = route.path() {
            self.inner.navigator.redirect(path);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, AuthState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, apply: impl FnOnce(&mut AuthState)) {
        let snapshot = {
            let mut state = self.lock_state();
            apply(&mut state);
            state.clone()
        };
        let observer = self.inner.observer.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(observer) = observer {
            observer(&snapshot);
        }
    }
}
