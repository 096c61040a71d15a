//! Fallback for unknown routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"404"</h1>
                <p class="auth-card__message">"The page you are looking for does not exist."</p>
                <div class="auth-links">
                    <a href=routing::LOGIN_PATH>"Go home"</a>
                </div>
            </div>
        </div>
    }
}
