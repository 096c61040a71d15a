//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toasts::{SignalNotifier, Toasts};
use crate::pages::{
    dashboard::DashboardPage, forgot_password::ForgotPasswordPage, login::LoginPage, not_found::NotFoundPage,
    register::RegisterPage, reset_password::ResetPasswordPage,
};
use crate::state::auth::{AuthContext, AuthState};
use crate::state::notice::NoticeState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Browser wiring: page-origin API, `localStorage` + `document.cookie`, and
/// full-page redirects.
#[cfg(feature = "hydrate")]
fn session_context(notifier: SignalNotifier) -> AuthContext {
    AuthContext::new(
        Arc::new(crate::net::http::HttpApi::from_window()),
        crate::state::session::browser_session(),
        Arc::new(crate::util::navigation::WindowNavigator),
        Arc::new(notifier),
    )
}

/// Server-render wiring. Session operations only run after hydration, so the
/// backends here hold nothing between requests.
#[cfg(not(feature = "hydrate"))]
fn session_context(notifier: SignalNotifier) -> AuthContext {
    use crate::state::session::{MemoryCookies, MemoryStorage, SessionStore};

    AuthContext::new(
        Arc::new(crate::net::http::HttpApi::default()),
        SessionStore::new(Arc::new(MemoryStorage::default()), Arc::new(MemoryCookies::default())),
        Arc::new(crate::util::navigation::InertNavigator),
        Arc::new(notifier),
    )
}

/// Root application component.
///
/// Provides the auth state signal, the toast queue, and the `AuthContext`
/// that owns the session, then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth_state = RwSignal::new(AuthState::default());
    let notices = RwSignal::new(NoticeState::default());
    provide_context(auth_state);
    provide_context(notices);

    let auth = session_context(SignalNotifier(notices));
    auth.observe(move |state| {
        let _ = auth_state.try_set(state.clone());
    });
    provide_context(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/contacthub.css"/>
        <Title text="ContactHub"/>

        <Toasts/>
        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("forgot_password") view=ForgotPasswordPage/>
                <Route path=StaticSegment("reset_password") view=ResetPasswordPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
