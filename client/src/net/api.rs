//! REST API contract for the contacts backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ContactApi` is the seam between session/contacts state and the network.
//! The browser build talks to the backend through [`super::http::HttpApi`];
//! tests substitute a scripted implementation.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<_, ApiError>`. Transport failures and
//! non-success statuses are distinct variants so callers can drive identical
//! state transitions while still showing "server rejected" and "request
//! failed" differently.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{AuthResponse, Contact, ContactStats, Credentials, Registration, User};

pub const LOGIN_ENDPOINT: &str = "/api/login";
pub const REGISTER_ENDPOINT: &str = "/api/register";
pub const VERIFY_TOKEN_ENDPOINT: &str = "/api/verify-token";
pub const LOGOUT_ENDPOINT: &str = "/api/logout";
pub const DELETE_ACCOUNT_ENDPOINT: &str = "/api/delete-account";
pub const FORGOT_PASSWORD_ENDPOINT: &str = "/api/forgot-password";
pub const RESET_PASSWORD_ENDPOINT: &str = "/api/reset-password";
pub const CONTACTS_ENDPOINT: &str = "/api/contacts";
pub const CONTACT_SEARCH_ENDPOINT: &str = "/api/contacts/search";
pub const CONTACT_STATS_ENDPOINT: &str = "/api/contacts/stats";

/// Shown whenever the request never produced a usable response.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed. Please check your connection and try again.";

/// Failure of a single API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    /// The request could not be sent or the connection dropped.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with success but the body did not parse.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    /// `401` means the bearer token is no longer accepted.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }

    /// Server-provided message, if the server sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message: Some(message), .. } => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the server message when present, `fallback` for
    /// other rejections, and a generic transport message otherwise.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message: Some(message), .. } => message.clone(),
            Self::Rejected { message: None, .. } | Self::Decode(_) => fallback.to_owned(),
            Self::Transport(_) => REQUEST_FAILED_MESSAGE.to_owned(),
        }
    }
}

/// Remote operations the app performs. Bearer-authenticated calls take the
/// session token explicitly; implementations never read session storage.
#[async_trait::async_trait(?Send)]
pub trait ContactApi: Send + Sync {
    /// `POST /api/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    /// `POST /api/register`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection (e.g. duplicate email) or transport failure.
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError>;

    /// `GET /api/verify-token`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the token is not accepted or the call fails.
    async fn verify_token(&self, token: &str) -> Result<User, ApiError>;

    /// `POST /api/logout`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    async fn logout(&self, token: &str) -> Result<(), ApiError>;

    /// `DELETE /api/delete-account` with `{password}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection (e.g. wrong password) or transport failure.
    async fn delete_account(&self, token: &str, password: &str) -> Result<(), ApiError>;

    /// `POST /api/forgot-password` with `{email}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    async fn forgot_password(&self, email: &str) -> Result<(), ApiError>;

    /// `POST /api/reset-password` with `{token, password}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection (expired reset token) or transport failure.
    async fn reset_password(&self, reset_token: &str, password: &str) -> Result<(), ApiError>;

    /// `POST /api/contacts`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    async fn create_contact(&self, token: &str, contact: &Contact) -> Result<(), ApiError>;

    /// `GET /api/contacts/search?registration_number=...`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when no contact matches or the call fails.
    async fn search_contact(&self, token: &str, registration_number: &str) -> Result<Contact, ApiError>;

    /// `GET /api/contacts/stats`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    async fn contact_stats(&self, token: &str) -> Result<ContactStats, ApiError>;
}
