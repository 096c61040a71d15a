//! Reset-password page, reached from the emailed `?token=...` link.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use routing::{GuardRequest, RESET_PASSWORD_PATH, RESET_TOKEN_PARAM};

use crate::state::auth::AuthContext;

pub const NEW_PASSWORD_REQUIRED_MESSAGE: &str = "Enter a new password.";
pub const RESET_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const RESET_SUCCESS_MESSAGE: &str = "Password successfully reset! Redirecting to login...";

/// Delay before returning to login after a successful reset.
#[cfg(feature = "hydrate")]
const RETURN_TO_LOGIN_DELAY: std::time::Duration = std::time::Duration::from_secs(3);

pub fn validate_new_password(password: &str, confirm: &str) -> Result<String, &'static str> {
    if password.is_empty() {
        return Err(NEW_PASSWORD_REQUIRED_MESSAGE);
    }
    if password != confirm {
        return Err(RESET_MISMATCH_MESSAGE);
    }
    Ok(password.to_owned())
}

/// Where to send a visitor who lands here with `token`, if anywhere.
pub fn missing_token_redirect(token: Option<&str>) -> Option<&'static str> {
    routing::evaluate(&GuardRequest::new(RESET_PASSWORD_PATH).with_reset_token(token)).location()
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let query = use_query_map();
    let reset_token = Memo::new(move |_| query.with(|q| q.get(RESET_TOKEN_PARAM)));

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let succeeded = RwSignal::new(false);

    let navigate_away = navigate.clone();
    Effect::new(move || {
        if let Some(location) = missing_token_redirect(reset_token.get().as_deref()) {
            navigate_away(location, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    #[cfg(feature = "hydrate")]
    let scope = crate::util::task::TaskScope::for_component();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(None);
        let Some(token) = reset_token.get_untracked().filter(|t| !t.is_empty()) else {
            return;
        };
        let new_password = match validate_new_password(&password.get(), &confirm.get()) {
            Ok(value) => value,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            let navigate = navigate.clone();
            scope.spawn(async move {
                match auth.reset_password(&token, &new_password).await {
                    Ok(()) => {
                        succeeded.set(true);
                        busy.set(false);
                        gloo_timers::future::sleep(RETURN_TO_LOGIN_DELAY).await;
                        navigate(routing::LOGIN_PATH, NavigateOptions::default());
                    }
                    Err(message) => {
                        error.set(Some(message));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, new_password, &auth, &navigate, succeeded);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create New Password"</h1>
                <form class="auth-form" class:auth-form--hidden=move || succeeded.get() on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="New password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm new password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Resetting..." } else { "Reset Password" }}
                    </button>
                </form>
                <Show when=move || succeeded.get()>
                    <p class="auth-card__message">{RESET_SUCCESS_MESSAGE}</p>
                </Show>
                <div class="auth-links">
                    <a href=routing::LOGIN_PATH>"Back to login"</a>
                </div>
            </div>
        </div>
    }
}
