use super::*;
use crate::net::api::VERIFY_TOKEN_ENDPOINT;
use crate::net::types::{User, UserId};
use crate::state::test_helpers::Harness;
use futures::executor::block_on;
use leptos::reactive::owner::Owner;

fn signed_in() -> AuthState {
    AuthState {
        user: Some(User { id: UserId::Number(1), name: Some("Alice".to_owned()), email: None }),
        loading: false,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    assert!(!should_redirect_unauth(&signed_in()));
}

#[test]
fn placeholder_until_auth_settles() {
    assert_eq!(protected_view(&AuthState::default()), ProtectedView::Placeholder);
    let refreshing = AuthState { loading: true, ..signed_in() };
    assert_eq!(protected_view(&refreshing), ProtectedView::Placeholder);
}

#[test]
fn placeholder_when_settled_without_user() {
    let state = AuthState { user: None, loading: false };
    assert_eq!(protected_view(&state), ProtectedView::Placeholder);
}

#[test]
fn content_for_verified_user() {
    assert_eq!(protected_view(&signed_in()), ProtectedView::Content);
}

// =============================================================================
// session_check_on_mount
// =============================================================================

#[test]
fn mount_check_verifies_session_once() {
    let h = Harness::signed_in_at("/dashboard", "abc");
    h.api.ok(VERIFY_TOKEN_ENDPOINT, serde_json::json!({ "user": { "id": 1 } }));
    let owner = Owner::new();

    let check = owner.with(|| session_check_on_mount(h.auth.clone()));
    block_on(check);

    assert_eq!(h.api.calls_to(VERIFY_TOKEN_ENDPOINT).len(), 1);
    assert_eq!(protected_view(&h.auth.state()), ProtectedView::Content);
}

#[test]
fn mount_check_is_dropped_when_owner_is_disposed_first() {
    let h = Harness::signed_in_at("/dashboard", "abc");
    let owner = Owner::new();

    let check = owner.with(|| session_check_on_mount(h.auth.clone()));
    owner.cleanup();
    block_on(check);

    assert!(h.api.calls().is_empty());
    assert!(h.auth.state().loading);
}
