//! Forgot-password page: requests reset instructions by email.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use leptos::prelude::*;

use crate::state::auth::AuthContext;
use crate::state::notice::Notice;

pub const EMAIL_REQUIRED_MESSAGE: &str = "Enter your email address.";
pub const INSTRUCTIONS_SENT_MESSAGE: &str = "Password reset instructions have been sent to your email.";

pub fn validate_reset_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(EMAIL_REQUIRED_MESSAGE);
    }
    Ok(email.to_owned())
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let submitted = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let scope = crate::util::task::TaskScope::for_component();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_reset_email(&email.get()) {
            Ok(value) => value,
            Err(message) => {
                auth.notify(Notice::error(message));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            scope.spawn(async move {
                match auth.request_password_reset(&email_value).await {
                    Ok(()) => submitted.set(true),
                    Err(message) => auth.notify(Notice::error(message)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, submitted);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset Password"</h1>
                <form class="auth-form" class:auth-form--hidden=move || submitted.get() on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Enter your email address"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Sending..." } else { "Send Reset Instructions" }}
                    </button>
                </form>
                <Show when=move || submitted.get()>
                    <p class="auth-card__message">{INSTRUCTIONS_SENT_MESSAGE}</p>
                </Show>
                <div class="auth-links">
                    <a href=routing::LOGIN_PATH>"Back to login"</a>
                </div>
            </div>
        </div>
    }
}
