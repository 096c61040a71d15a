//! `/api/*` forwarding to the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to the page origin only. Requests under `/api/` are
//! replayed against `API_BASE_URL` with the same method, path, query, body,
//! and the headers the backend reads (`Authorization`, `Content-Type`,
//! `Accept`). The backend's status, content type, and body come back
//! unchanged.
//!
//! ERROR HANDLING
//! ==============
//! Upstream transport failures answer `502` with an `{"error": ...}` body,
//! the same shape the backend uses, so the client's error handling applies.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "Upstream API unavailable";

/// Request headers forwarded upstream.
const FORWARDED_REQUEST_HEADERS: [header::HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

pub async fn forward(State(state): State<AppState>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let url = upstream_url(&state.config.api_base_url, &uri);

    let mut outbound = HeaderMap::new();
    for name in FORWARDED_REQUEST_HEADERS {
        if let Some(value) = headers.get(&name) {
            outbound.insert(name, value.clone());
        }
    }

    let result = state
        .http
        .request(method.clone(), &url)
        .headers(outbound)
        .body(body)
        .send()
        .await;

    let upstream = match result {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::warn!(%method, %url, error = %e, "api proxy request failed");
            return bad_gateway();
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, %url, error = %e, "api proxy body read failed");
            return bad_gateway();
        }
    };
    tracing::debug!(%method, path = %uri.path(), status = status.as_u16(), "api proxied");

    let mut response = (status, bytes).into_response();
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    response
}

/// Backend URL for an incoming `/api/...` URI, query string included.
pub(crate) fn upstream_url(base_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{}{path_and_query}", base_url.trim_end_matches('/'))
}

fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "error": UPSTREAM_UNAVAILABLE_MESSAGE }))).into_response()
}
