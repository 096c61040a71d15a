//! # client
//!
//! Leptos frontend for ContactHub: login, registration, password reset, and
//! the contact dashboard. Rendered on the server by the `server` crate and
//! hydrated in the browser.
//!
//! `state::auth::AuthContext` owns the signed-in session; pages call into it
//! and render from the `AuthState` signal it publishes.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the server-rendered
/// body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
