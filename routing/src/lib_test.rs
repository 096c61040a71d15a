use super::*;
use proptest::prelude::*;

// =============================================================================
// classify
// =============================================================================

#[test]
fn classify_public_auth_routes() {
    assert_eq!(Route::classify("/"), Route::Login);
    assert_eq!(Route::classify("/register"), Route::Register);
    assert_eq!(Route::classify("/forgot_password"), Route::ForgotPassword);
    assert_eq!(Route::classify("/reset_password"), Route::ResetPassword);
}

#[test]
fn classify_ignores_single_trailing_slash() {
    assert_eq!(Route::classify("/register/"), Route::Register);
    assert_eq!(Route::classify("/dashboard/"), Route::Dashboard);
}

#[test]
fn classify_dashboard_and_subroutes() {
    assert_eq!(Route::classify("/dashboard"), Route::Dashboard);
    assert_eq!(Route::classify("/dashboard/contacts"), Route::Dashboard);
    assert_eq!(Route::classify("/dashboard/a/b/c"), Route::Dashboard);
}

#[test]
fn classify_does_not_match_dashboard_prefix_words() {
    assert_eq!(Route::classify("/dashboards"), Route::Other);
    assert_eq!(Route::classify("/dashboardx/1"), Route::Other);
}

#[test]
fn classify_everything_else_as_other() {
    assert_eq!(Route::classify("/api/login"), Route::Other);
    assert_eq!(Route::classify("/pkg/client.wasm"), Route::Other);
    assert_eq!(Route::classify("/registerx"), Route::Other);
}

#[test]
fn public_auth_membership() {
    assert!(Route::Login.is_public_auth());
    assert!(Route::ResetPassword.is_public_auth());
    assert!(!Route::Dashboard.is_public_auth());
    assert!(!Route::Other.is_public_auth());
}

#[test]
fn route_paths_round_trip_through_classify() {
    for route in [Route::Login, Route::Register, Route::ForgotPassword, Route::ResetPassword, Route::Dashboard] {
        let path = route.path().unwrap();
        assert_eq!(Route::classify(path), route);
    }
    assert_eq!(Route::Other.path(), None);
}

// =============================================================================
// evaluate: decision table
// =============================================================================

#[test]
fn reset_password_with_token_allows() {
    let req = GuardRequest::new("/reset_password").with_reset_token(Some("r1"));
    assert_eq!(evaluate(&req), Decision::Allow);
    assert_eq!(evaluate(&req.with_session(Some("abc"))), Decision::Allow);
}

#[test]
fn reset_password_without_token_redirects_to_forgot_password() {
    let req = GuardRequest::new("/reset_password");
    assert_eq!(evaluate(&req), Decision::RedirectToForgotPassword);
    assert_eq!(evaluate(&req.with_session(Some("abc"))), Decision::RedirectToForgotPassword);
}

#[test]
fn reset_password_with_empty_token_counts_as_missing() {
    let req = GuardRequest::new("/reset_password").with_reset_token(Some(""));
    assert_eq!(evaluate(&req), Decision::RedirectToForgotPassword);
}

#[test]
fn dashboard_without_session_redirects_to_login() {
    let req = GuardRequest::new("/dashboard/settings");
    assert_eq!(evaluate(&req), Decision::RedirectToLogin);
    assert_eq!(Decision::RedirectToLogin.location(), Some("/"));
}

#[test]
fn empty_cookie_counts_as_no_session() {
    let req = GuardRequest::new("/dashboard").with_session(Some(""));
    assert_eq!(evaluate(&req), Decision::RedirectToLogin);
}

#[test]
fn dashboard_with_session_allows() {
    let req = GuardRequest::new("/dashboard").with_session(Some("abc"));
    assert_eq!(evaluate(&req), Decision::Allow);
}

#[test]
fn public_auth_with_session_redirects_to_dashboard() {
    for path in ["/", "/register", "/forgot_password"] {
        let req = GuardRequest::new(path).with_session(Some("abc"));
        assert_eq!(evaluate(&req), Decision::RedirectToDashboard, "path {path}");
    }
}

#[test]
fn public_auth_without_session_allows() {
    for path in ["/", "/register", "/forgot_password"] {
        assert_eq!(evaluate(&GuardRequest::new(path)), Decision::Allow, "path {path}");
    }
}

#[test]
fn allow_has_no_location() {
    assert_eq!(Decision::Allow.location(), None);
    assert_eq!(Decision::RedirectToDashboard.location(), Some("/dashboard"));
    assert_eq!(Decision::RedirectToForgotPassword.location(), Some("/forgot_password"));
}

// =============================================================================
// properties
// =============================================================================

fn token() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Za-z0-9._-]{0,24}")
}

proptest! {
    #[test]
    fn unclassified_paths_always_allow(
        tail in "[a-z0-9_/]{1,30}",
        session in token(),
        reset in token(),
    ) {
        let path = format!("/x{tail}");
        prop_assume!(Route::classify(&path) == Route::Other);
        let req = GuardRequest::new(&path)
            .with_session(session.as_deref())
            .with_reset_token(reset.as_deref());
        prop_assert_eq!(evaluate(&req), Decision::Allow);
    }

    #[test]
    fn reset_password_with_token_allows_regardless_of_cookie(
        reset in "[A-Za-z0-9]{1,32}",
        session in token(),
    ) {
        let req = GuardRequest::new(RESET_PASSWORD_PATH)
            .with_reset_token(Some(&reset))
            .with_session(session.as_deref());
        prop_assert_eq!(evaluate(&req), Decision::Allow);
    }

    #[test]
    fn reset_password_without_token_redirects_regardless_of_cookie(session in token()) {
        let req = GuardRequest::new(RESET_PASSWORD_PATH).with_session(session.as_deref());
        prop_assert_eq!(evaluate(&req), Decision::RedirectToForgotPassword);
    }

    #[test]
    fn dashboard_subpaths_without_cookie_redirect_to_login(
        sub in "(/[a-z0-9_-]{1,12}){0,4}",
        reset in token(),
    ) {
        let path = format!("{DASHBOARD_PATH}{sub}");
        let req = GuardRequest::new(&path).with_reset_token(reset.as_deref());
        prop_assert_eq!(evaluate(&req), Decision::RedirectToLogin);
    }

    #[test]
    fn public_auth_with_cookie_redirects_to_dashboard(
        idx in 0usize..3,
        session in "[A-Za-z0-9]{1,32}",
    ) {
        let path = [LOGIN_PATH, REGISTER_PATH, FORGOT_PASSWORD_PATH][idx];
        let req = GuardRequest::new(path).with_session(Some(&session));
        prop_assert_eq!(evaluate(&req), Decision::RedirectToDashboard);
    }
}
