use axum::body::Body;
use axum::http::{Method, header};

use super::*;

fn get(uri: &str) -> Request {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_session(uri: &str, token: &str) -> Request {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("theme=dark; {SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap()
}

#[test]
fn dashboard_without_cookie_goes_to_login() {
    assert_eq!(decide(&get("/dashboard")), Decision::RedirectToLogin);
    assert_eq!(decide(&get("/dashboard/contacts/7")), Decision::RedirectToLogin);
}

#[test]
fn dashboard_with_cookie_passes() {
    assert_eq!(decide(&get_with_session("/dashboard", "abc")), Decision::Allow);
}

#[test]
fn empty_cookie_counts_as_absent() {
    assert_eq!(decide(&get_with_session("/dashboard", "")), Decision::RedirectToLogin);
}

#[test]
fn public_auth_pages_with_cookie_go_to_dashboard() {
    for path in ["/", "/register", "/forgot_password", "/register/"] {
        assert_eq!(decide(&get_with_session(path, "abc")), Decision::RedirectToDashboard, "{path}");
    }
}

#[test]
fn reset_password_reads_query_token() {
    assert_eq!(decide(&get("/reset_password?token=r1")), Decision::Allow);
    assert_eq!(decide(&get_with_session("/reset_password?token=r1", "abc")), Decision::Allow);
    assert_eq!(decide(&get("/reset_password")), Decision::RedirectToForgotPassword);
    assert_eq!(decide(&get("/reset_password?token=")), Decision::RedirectToForgotPassword);
    assert_eq!(decide(&get("/reset_password?other=1")), Decision::RedirectToForgotPassword);
}

#[test]
fn unclassified_paths_pass() {
    assert_eq!(decide(&get("/about")), Decision::Allow);
    assert_eq!(decide(&get_with_session("/about", "abc")), Decision::Allow);
}

#[test]
fn unclassified_paths_skip_the_guard() {
    assert_eq!(decide(&get("/api/contacts/stats")), Decision::Allow);
    assert_eq!(decide(&get("/pkg/contacthub.wasm")), Decision::Allow);
    assert_eq!(decide(&get("/favicon.ico")), Decision::Allow);
    assert_eq!(decide(&get("/healthz")), Decision::Allow);
}

#[test]
fn dotted_dashboard_paths_are_still_guarded() {
    assert_eq!(decide(&get("/dashboard/report.pdf")), Decision::RedirectToLogin);
    assert_eq!(decide(&get("/dashboard/v1.2")), Decision::RedirectToLogin);
    assert_eq!(decide(&get_with_session("/dashboard/report.pdf", "abc")), Decision::Allow);
}

#[test]
fn guard_applies_to_every_method_on_classified_paths() {
    for method in [Method::POST, Method::DELETE, Method::PUT] {
        let request = Request::builder().method(method.clone()).uri("/dashboard").body(Body::empty()).unwrap();
        assert_eq!(decide(&request), Decision::RedirectToLogin, "{method}");
    }
    let head = Request::builder()
        .method(Method::HEAD)
        .uri("/register")
        .header(header::COOKIE, "token=abc")
        .body(Body::empty())
        .unwrap();
    assert_eq!(decide(&head), Decision::RedirectToDashboard);
}
