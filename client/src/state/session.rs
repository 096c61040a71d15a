//! Session token persistence: client storage plus a cookie mirror.
//!
//! DESIGN
//! ======
//! Persistent storage owns the token. The cookie is derived from it so the
//! server-side navigation guard can see the session; the client never reads
//! the cookie back. Writes and clears always touch storage first, then the
//! cookie, and `sync_cookie` re-derives the cookie from storage when the two
//! may have drifted.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};
use routing::SESSION_COOKIE;

/// Persistent storage refused a write (private browsing, quota exceeded).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token storage unavailable: {0}")]
pub struct StorageError(pub String);

/// Key-value persistent storage (browser `localStorage` or in-memory).
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    /// # Errors
    ///
    /// Returns [`StorageError`] when the value was not persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// Sink for `Set-Cookie` style strings (browser `document.cookie` or in-memory).
pub trait CookieWriter: Send + Sync {
    fn write(&self, cookie: &str);
}

/// Cookie string carrying `token`, scoped to the whole site.
#[must_use]
pub fn session_cookie(token: &str, secure: bool) -> String {
    Cookie::build((SESSION_COOKIE, token.to_owned()))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
        .to_string()
}

/// Cookie string that expires the session cookie immediately.
#[must_use]
pub fn expired_session_cookie(secure: bool) -> String {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
        .to_string()
}

/// The session token store shared by everything that needs the bearer token.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    cookies: Arc<dyn CookieWriter>,
    secure: bool,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn TokenStorage>, cookies: Arc<dyn CookieWriter>) -> Self {
        Self { storage, cookies, secure: false }
    }

    /// Mark the mirrored cookie `Secure` (pages served over https).
    #[must_use]
    pub fn with_secure_cookie(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Current token from persistent storage. Empty values count as absent.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.storage.get(SESSION_COOKIE).filter(|token| !token.is_empty())
    }

    /// Persist `token`, then mirror it into the cookie. The cookie is left
    /// alone when storage refuses the write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when persistent storage rejects the token.
    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(SESSION_COOKIE, token)?;
        self.cookies.write(&session_cookie(token, self.secure));
        Ok(())
    }

    pub fn clear(&self) {
        self.storage.remove(SESSION_COOKIE);
        self.cookies.write(&expired_session_cookie(self.secure));
    }

    /// Rewrite the cookie from storage. Returns the token that was mirrored.
    pub fn sync_cookie(&self) -> Option<String> {
        let token = self.get()?;
        self.cookies.write(&session_cookie(&token, self.secure));
        Some(token)
    }
}

// =============================================================================
// IN-MEMORY BACKENDS (tests + SSR)
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Cookie jar that applies cookie strings the way a browser would.
#[derive(Debug, Default)]
pub struct MemoryCookies {
    jar: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<String>>,
}

impl MemoryCookies {
    /// Current value of the named cookie.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }

    /// Every cookie string written so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Drop a cookie without going through the session store.
    pub fn evict(&self, name: &str) {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner).remove(name);
    }
}

impl CookieWriter for MemoryCookies {
    fn write(&self, raw: &str) {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(raw.to_owned());
        let Ok(parsed) = Cookie::parse(raw.to_owned()) else {
            return;
        };
        let mut jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        if parsed.max_age() == Some(Duration::ZERO) {
            jar.remove(parsed.name());
        } else {
            jar.insert(parsed.name().to_owned(), parsed.value().to_owned());
        }
    }
}

// =============================================================================
// BROWSER BACKENDS
// =============================================================================

/// `window.localStorage`. Looked up per call so the type stays `Send + Sync`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl TokenStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or_else(|| StorageError("localStorage is not available".to_owned()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// `document.cookie`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookies;

#[cfg(feature = "hydrate")]
impl CookieWriter for DocumentCookies {
    fn write(&self, cookie: &str) {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Ok(html) = document.dyn_into::<web_sys::HtmlDocument>() {
            let _ = html.set_cookie(cookie);
        }
    }
}

/// Session store over browser storage; the cookie is `Secure` on https pages.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn browser_session() -> SessionStore {
    let secure = web_sys::window()
        .and_then(|w| w.location().protocol().ok())
        .is_some_and(|protocol| protocol == "https:");
    SessionStore::new(Arc::new(LocalStorage), Arc::new(DocumentCookies)).with_secure_cookie(secure)
}
