//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages wrap their content in [`ProtectedRoute`], which verifies
//! the session once on mount and renders a placeholder until a user is known.
//! The server guard already keeps cookie-less visitors off these routes; this
//! wrapper covers tokens that the backend no longer accepts.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthContext, AuthState};
use crate::util::task::TaskScope;

/// What a protected route shows for a given auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtectedView {
    Placeholder,
    Content,
}

#[must_use]
pub fn protected_view(state: &AuthState) -> ProtectedView {
    if !state.loading && state.user.is_some() {
        ProtectedView::Content
    } else {
        ProtectedView::Placeholder
    }
}

/// Whether auth has settled without a signed-in user.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to the login page whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(routing::LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Session check for a protected view that just mounted. The check is bound
/// to the current owner's scope and aborted if the view is disposed first.
pub fn session_check_on_mount(session: AuthContext) -> impl Future<Output = ()> + 'static {
    let check = TaskScope::for_component().bind(async move { session.check_auth().await });
    async move {
        if check.await.is_err() {
            log::debug!("session check aborted on unmount");
        }
    }
}

/// Render `children` only for a verified user.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AuthContext>();
    install_unauth_redirect(auth, use_navigate());

    let check = session_check_on_mount(session);
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(check);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(check);
    }

    view! {
        <Show
            when=move || protected_view(&auth.get()) == ProtectedView::Content
            fallback=|| view! { <div class="protected-placeholder">"Checking your session..."</div> }
        >
            {children()}
        </Show>
    }
}
