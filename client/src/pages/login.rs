//! Login page: email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Credentials;
use crate::state::auth::AuthContext;
#[cfg(feature = "hydrate")]
use crate::state::auth::AuthOutcome;
use crate::state::notice::Notice;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Successfully logged in! Redirecting to Dashboard...";
pub const LOGIN_REQUIRED_FIELDS_MESSAGE: &str = "Enter your email and password.";

/// Trim and require both fields.
pub fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LOGIN_REQUIRED_FIELDS_MESSAGE);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let scope = crate::util::task::TaskScope::for_component();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                auth.notify(Notice::error(message));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            let navigate = navigate.clone();
            scope.spawn(async move {
                match auth.login(&credentials).await {
                    AuthOutcome::Success => {
                        auth.notify(Notice::success(LOGIN_SUCCESS_MESSAGE));
                        navigate(routing::DASHBOARD_PATH, NavigateOptions::default());
                    }
                    AuthOutcome::Failure(message) => auth.notify(Notice::error(message)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (credentials, &navigate);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"ContactHub"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email address"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <div class="auth-links">
                    <a href=routing::FORGOT_PASSWORD_PATH>"Forgot your password?"</a>
                    <a href=routing::REGISTER_PATH>"Create an account"</a>
                </div>
            </div>
        </div>
    }
}
