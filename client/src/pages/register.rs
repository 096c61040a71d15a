//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Registration;
use crate::state::auth::AuthContext;
#[cfg(feature = "hydrate")]
use crate::state::auth::RegisterOutcome;
use crate::state::notice::Notice;

pub const REGISTER_SIGNED_IN_MESSAGE: &str = "Registration successful! Redirecting to Dashboard...";
pub const REGISTER_SIGN_IN_MESSAGE: &str = "Registration successful! Please sign in.";
pub const REGISTER_REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Field values as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Check the form before any request is made.
pub fn validate_registration(form: &RegisterForm) -> Result<Registration, &'static str> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(REGISTER_REQUIRED_FIELDS_MESSAGE);
    }
    if form.password != form.confirm_password {
        return Err(PASSWORD_MISMATCH_MESSAGE);
    }
    Ok(Registration { name: name.to_owned(), email: email.to_owned(), password: form.password.clone() })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let scope = crate::util::task::TaskScope::for_component();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration = match validate_registration(&form.get()) {
            Ok(registration) => registration,
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
                match auth.register(&registration).await {
                    RegisterOutcome::SignedIn => {
                        auth.notify(Notice::success(REGISTER_SIGNED_IN_MESSAGE));
                        navigate(routing::DASHBOARD_PATH, NavigateOptions::default());
                    }
                    RegisterOutcome::Registered => {
                        auth.notify(Notice::success(REGISTER_SIGN_IN_MESSAGE));
                        navigate(routing::LOGIN_PATH, NavigateOptions::default());
                    }
                    RegisterOutcome::Failure(message) => auth.notify(Notice::error(message)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (registration, &navigate);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Full name"
                        autocomplete="name"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email address"
                        autocomplete="email"
                        prop:value=move || form.get().email
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="new-password"
                        prop:value=move || form.get().password
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        autocomplete="new-password"
                        prop:value=move || form.get().confirm_password
                        on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <div class="auth-links">
                    <a href=routing::LOGIN_PATH>"Already have an account? Sign in"</a>
                </div>
            </div>
        </div>
    }
}
