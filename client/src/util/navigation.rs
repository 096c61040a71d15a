//! Navigation seam used by session logic.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session operations redirect as a side effect. In the browser a redirect is
//! a full page load, so the server-side guard sees the updated cookie on the
//! very next request.

/// Where the user is and how to send them elsewhere.
pub trait Navigator: Send + Sync {
    /// Path of the current page, without query string.
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// Browser navigator backed by `window.location`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for WindowNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| routing::LOGIN_PATH.to_owned())
    }

    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}

/// Navigator for server rendering, where session operations never run.
#[derive(Clone, Copy, Debug, Default)]
pub struct InertNavigator;

impl Navigator for InertNavigator {
    fn current_path(&self) -> String {
        routing::LOGIN_PATH.to_owned()
    }

    fn redirect(&self, _path: &str) {}
}
