//! Dashboard page state.
//!
//! DESIGN
//! ======
//! The stats loop is written against an injected `sleep` so the hydrate build
//! can drive it with `gloo_timers` while tests advance it synchronously. The
//! loop stops on its own once the session is gone; page teardown stops it
//! through the page's `TaskScope`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::future::Future;
use std::time::Duration;

use super::auth::AuthContext;
use crate::net::types::{Contact, ContactStats};

/// How often the stats panel refetches while the dashboard is mounted.
pub const STATS_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Reactive state backing the dashboard page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub stats: Option<ContactStats>,
    pub stats_error: Option<String>,
    pub search_result: Option<Contact>,
    pub searching: bool,
    pub submitting: bool,
}

impl DashboardState {
    /// Record a stats fetch. A failed refresh keeps the last good numbers.
    pub fn apply_stats(&mut self, result: Result<ContactStats, String>) {
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                self.stats_error = None;
            }
            Err(message) => self.stats_error = Some(message),
        }
    }

    /// Record a search. A miss clears the previous result.
    pub fn apply_search(&mut self, result: &Result<Contact, String>) {
        self.searching = false;
        self.search_result = result.as_ref().ok().cloned();
    }
}

/// Fetch stats now and then every [`STATS_REFRESH_INTERVAL`] until signed out.
pub async fn refresh_stats<S, F>(auth: &AuthContext, mut sleep: S, on_update: impl Fn(Result<ContactStats, String>))
where
    S: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    while auth.token().is_some() {
        on_update(auth.contact_stats().await);
        sleep(STATS_REFRESH_INTERVAL).await;
    }
    log::debug!("stats refresh stopped: no session");
}
