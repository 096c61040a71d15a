//! `reqwest`-backed [`ContactApi`] implementation.
//!
//! The same code runs in the browser (reqwest's fetch backend) and natively.
//! In the browser the base URL is the page origin; the server proxies `/api`
//! to the backend.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::api::{
    ApiError, CONTACT_SEARCH_ENDPOINT, CONTACT_STATS_ENDPOINT, CONTACTS_ENDPOINT, ContactApi, DELETE_ACCOUNT_ENDPOINT,
    FORGOT_PASSWORD_ENDPOINT, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, REGISTER_ENDPOINT, RESET_PASSWORD_ENDPOINT,
    VERIFY_TOKEN_ENDPOINT,
};
use super::types::{AuthResponse, Contact, ContactStats, Credentials, ErrorBody, Registration, User, VerifyResponse};

/// Default backend address used outside the browser.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: normalize_base_url(&base_url.into()) }
    }

    /// API rooted at the current page origin.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        Self::new(origin)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        endpoint_url(&self.base_url, endpoint)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = dispatch(request).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        dispatch(request).await.map(|_| ())
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

pub(crate) fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{base_url}{endpoint}")
}

/// Build the error for a non-success status from its raw body.
pub(crate) fn rejection(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);
    ApiError::rejected(status, message)
}

async fn dispatch(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(rejection(status.as_u16(), &body))
}

#[async_trait::async_trait(?Send)]
impl ContactApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let request = self.client.post(self.url(LOGIN_ENDPOINT)).json(credentials);
        self.send_json(request).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let request = self.client.post(self.url(REGISTER_ENDPOINT)).json(registration);
        self.send_json(request).await
    }

    async fn verify_token(&self, token: &str) -> Result<User, ApiError> {
        let request = self.client.get(self.url(VERIFY_TOKEN_ENDPOINT)).bearer_auth(token);
        let body: VerifyResponse = self.send_json(request).await?;
        Ok(body.user)
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let request = self.client.post(self.url(LOGOUT_ENDPOINT)).bearer_auth(token);
        self.send_empty(request).await
    }

    async fn delete_account(&self, token: &str, password: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(DELETE_ACCOUNT_ENDPOINT))
            .bearer_auth(token)
            .json(&serde_json::json!({ "password": password }));
        self.send_empty(request).await
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(FORGOT_PASSWORD_ENDPOINT))
            .json(&serde_json::json!({ "email": email }));
        self.send_empty(request).await
    }

    async fn reset_password(&self, reset_token: &str, password: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(RESET_PASSWORD_ENDPOINT))
            .json(&serde_json::json!({ "token": reset_token, "password": password }));
        self.send_empty(request).await
    }

    async fn create_contact(&self, token: &str, contact: &Contact) -> Result<(), ApiError> {
        let request = self.client.post(self.url(CONTACTS_ENDPOINT)).bearer_auth(token).json(contact);
        self.send_empty(request).await
    }

    async fn search_contact(&self, token: &str, registration_number: &str) -> Result<Contact, ApiError> {
        let request = self
            .client
            .get(self.url(CONTACT_SEARCH_ENDPOINT))
            .bearer_auth(token)
            .query(&[("registration_number", registration_number)]);
        self.send_json(request).await
    }

    async fn contact_stats(&self, token: &str) -> Result<ContactStats, ApiError> {
        let request = self.client.get(self.url(CONTACT_STATS_ENDPOINT)).bearer_auth(token);
        self.send_json(request).await
    }
}
