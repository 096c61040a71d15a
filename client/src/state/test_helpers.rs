//! Scripted collaborators for exercising `AuthContext` without a network.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::auth::AuthContext;
use super::notice::{Notice, Notifier};
use super::session::{MemoryCookies, MemoryStorage, SessionStore, StorageError, TokenStorage};
use crate::net::api::{
    ApiError, CONTACT_SEARCH_ENDPOINT, CONTACT_STATS_ENDPOINT, CONTACTS_ENDPOINT, ContactApi, DELETE_ACCOUNT_ENDPOINT,
    FORGOT_PASSWORD_ENDPOINT, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, REGISTER_ENDPOINT, RESET_PASSWORD_ENDPOINT,
    VERIFY_TOKEN_ENDPOINT,
};
use crate::net::types::{AuthResponse, Contact, ContactStats, Credentials, Registration, User};
use crate::util::navigation::Navigator;

// =============================================================================
// ScriptedApi
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub endpoint: &'static str,
    pub token: Option<String>,
    pub body: Value,
}

/// `ContactApi` that replays queued replies per endpoint and records calls.
/// An endpoint with nothing queued fails with a transport error.
#[derive(Default)]
pub struct ScriptedApi {
    replies: Mutex<HashMap<&'static str, VecDeque<Result<Value, ApiError>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn ok(&self, endpoint: &'static str, body: Value) {
        self.push(endpoint, Ok(body));
    }

    pub fn fail(&self, endpoint: &'static str, err: ApiError) {
        self.push(endpoint, Err(err));
    }

    pub fn reject(&self, endpoint: &'static str, status: u16, message: &str) {
        self.fail(endpoint, ApiError::rejected(status, Some(message.to_owned())));
    }

    pub fn offline(&self, endpoint: &'static str) {
        self.fail(endpoint, ApiError::Transport("connection refused".to_owned()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.endpoint == endpoint).collect()
    }

    fn push(&self, endpoint: &'static str, reply: Result<Value, ApiError>) {
        self.replies.lock().unwrap().entry(endpoint).or_default().push_back(reply);
    }

    fn answer<T: DeserializeOwned>(&self, endpoint: &'static str, token: Option<&str>, body: Value) -> Result<T, ApiError> {
        self.calls.lock().unwrap().push(Call { endpoint, token: token.map(str::to_owned), body });
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ApiError::Transport(format!("no scripted reply for {endpoint}"))))?;
        serde_json::from_value(reply).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl ContactApi for ScriptedApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.answer(LOGIN_ENDPOINT, None, serde_json::to_value(credentials).unwrap())
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.answer(REGISTER_ENDPOINT, None, serde_json::to_value(registration).unwrap())
    }

    async fn verify_token(&self, token: &str) -> Result<User, ApiError> {
        #[derive(serde::Deserialize)]
        struct Body {
            user: User,
        }
        let body: Body = self.answer(VERIFY_TOKEN_ENDPOINT, Some(token), Value::Null)?;
        Ok(body.user)
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.answer(LOGOUT_ENDPOINT, Some(token), Value::Null)
    }

    async fn delete_account(&self, token: &str, password: &str) -> Result<(), ApiError> {
        self.answer(DELETE_ACCOUNT_ENDPOINT, Some(token), serde_json::json!({ "password": password }))
    }

    async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.answer(FORGOT_PASSWORD_ENDPOINT, None, serde_json::json!({ "email": email }))
    }

    async fn reset_password(&self, reset_token: &str, password: &str) -> Result<(), ApiError> {
        self.answer(
            RESET_PASSWORD_ENDPOINT,
            None,
            serde_json::json!({ "token": reset_token, "password": password }),
        )
    }

    async fn create_contact(&self, token: &str, contact: &Contact) -> Result<(), ApiError> {
        self.answer(CONTACTS_ENDPOINT, Some(token), serde_json::to_value(contact).unwrap())
    }

    async fn search_contact(&self, token: &str, registration_number: &str) -> Result<Contact, ApiError> {
        self.answer(
            CONTACT_SEARCH_ENDPOINT,
            Some(token),
            serde_json::json!({ "registration_number": registration_number }),
        )
    }

    async fn contact_stats(&self, token: &str) -> Result<ContactStats, ApiError> {
        self.answer(CONTACT_STATS_ENDPOINT, Some(token), Value::Null)
    }
}

// =============================================================================
// RefusingStorage
// =============================================================================

/// Storage that rejects every write, like `localStorage` in private browsing.
#[derive(Default)]
pub struct RefusingStorage;

impl TokenStorage for RefusingStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError("quota exceeded".to_owned()))
    }

    fn remove(&self, _key: &str) {}
}

// =============================================================================
// Navigator + Notifier
// =============================================================================

pub struct RecordingNavigator {
    path: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self { path: Mutex::new(path.to_owned()), redirects: Mutex::new(Vec::new()) }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }

    pub fn last_redirect(&self) -> Option<String> {
        self.redirects().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn redirect(&self, path: &str) {
        *self.path.lock().unwrap() = path.to_owned();
        self.redirects.lock().unwrap().push(path.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// =============================================================================
// Harness
// =============================================================================

pub struct Harness {
    pub auth: AuthContext,
    pub api: Arc<ScriptedApi>,
    pub storage: Arc<MemoryStorage>,
    pub cookies: Arc<MemoryCookies>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    /// Fresh context whose navigator reports `path` as the current page.
    pub fn at(path: &str) -> Self {
        let api = Arc::new(ScriptedApi::default());
        let storage = Arc::new(MemoryStorage::default());
        let cookies = Arc::new(MemoryCookies::default());
        let navigator = Arc::new(RecordingNavigator::at(path));
        let notifier = Arc::new(RecordingNotifier::default());
        let session = SessionStore::new(storage.clone(), cookies.clone());
        let auth = AuthContext::new(api.clone(), session, navigator.clone(), notifier.clone());
        Self { auth, api, storage, cookies, navigator, notifier }
    }

    /// Same as [`Harness::at`] with `token` already stored and mirrored.
    pub fn signed_in_at(path: &str, token: &str) -> Self {
        let harness = Self::at(path);
        harness.storage.set("token", token).unwrap();
        SessionStore::new(harness.storage.clone(), harness.cookies.clone()).sync_cookie();
        harness
    }

    pub fn stored_token(&self) -> Option<String> {
        self.storage.get("token")
    }

    pub fn cookie_token(&self) -> Option<String> {
        self.cookies.get("token")
    }
}
