//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the API proxy and health check, stitches them with
//! Leptos SSR rendering under a single Axum router, and wraps everything in
//! the navigation guard so redirects happen before any page renders.

pub mod guard;
pub mod proxy;


use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Routes that are not Leptos pages.
fn api_routes(state: AppState) -> Router {
    let mut router = Router::new().route("/healthz", get(healthz));
    if state.config.proxy_api {
        router = router.route("/api/{*path}", any(proxy::forward));
    }
    router.with_state(state)
}

/// Apply the navigation guard and request tracing to a fully assembled router.
fn guarded(router: Router) -> Router {
    router
        .layer(middleware::from_fn(guard::guard))
        .layer(TraceLayer::new_for_http())
}

/// Leptos SSR frontend: API proxy + Leptos pages + `/pkg` assets, guarded.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(client::app::shell))
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(guarded(
        api_routes(state)
            .merge(leptos_router)
            .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))),
    ))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
