//! Navigation guard middleware.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before Leptos SSR on every request. Any path the `routing` crate
//! classifies (login, register, password pages, and everything under
//! `/dashboard`) goes through the shared decision table whatever its method or
//! extension: the request either passes through or the client gets a `307` to
//! the page it belongs on. Unclassified paths (API, assets, health) pass.
//!
//! ERROR HANDLING
//! ==============
//! Fails closed: a query string that cannot be decoded redirects to login.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::collections::HashMap;

use axum::extract::{Query, Request};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use routing::{Decision, GuardRequest, RESET_TOKEN_PARAM, Route, SESSION_COOKIE};

/// Axum middleware entry point.
pub async fn guard(request: Request, next: Next) -> Response {
    let decision = decide(&request);
    match decision.location() {
        None => next.run(request).await,
        Some(location) => {
            tracing::debug!(path = %request.uri().path(), ?decision, location, "guard redirect");
            Redirect::temporary(location).into_response()
        }
    }
}

/// Evaluate the decision table for one request.
pub(crate) fn decide(request: &Request) -> Decision {
    let uri = request.uri();
    if Route::classify(uri.path()) == Route::Other {
        return Decision::Allow;
    }

    let reset_token = match reset_token(uri) {
        Ok(token) => token,
        Err(error) => {
            tracing::warn!(path = %uri.path(), %error, "guard could not read query; redirecting to login");
            return Decision::RedirectToLogin;
        }
    };
    let jar = CookieJar::from_headers(request.headers());
    let session = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_owned());

    routing::evaluate(
        &GuardRequest::new(uri.path())
            .with_reset_token(reset_token.as_deref())
            .with_session(session.as_deref()),
    )
}

fn reset_token(uri: &Uri) -> Result<Option<String>, String> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).map_err(|e| e.body_text())?;
    Ok(params.get(RESET_TOKEN_PARAM).cloned())
}
