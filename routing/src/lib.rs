//! Route classification and the navigation guard decision table.
//!
//! This crate owns the path layout shared by `server` (which runs the guard
//! before rendering any page) and `client` (which needs the same route names
//! for in-app redirects). Everything here is pure: no I/O, no allocation on
//! the decision path.

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

/// Cookie (and local storage key) holding the session bearer token.
pub const SESSION_COOKIE: &str = "token";

/// Query parameter carrying the password-reset token on the reset page.
pub const RESET_TOKEN_PARAM: &str = "token";

pub const LOGIN_PATH: &str = "/";
pub const REGISTER_PATH: &str = "/register";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot_password";
pub const RESET_PASSWORD_PATH: &str = "/reset_password";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Static partition of request paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    /// `/dashboard` and every path beneath it.
    Dashboard,
    /// Anything the guard does not care about (assets, API, 404s).
    Other,
}

impl Route {
    /// Classify a request path. A single trailing slash is ignored.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let path = normalize(path);
        match path {
            LOGIN_PATH => Self::Login,
            REGISTER_PATH => Self::Register,
            FORGOT_PASSWORD_PATH => Self::ForgotPassword,
            RESET_PASSWORD_PATH => Self::ResetPassword,
            _ if is_dashboard(path) => Self::Dashboard,
            _ => Self::Other,
        }
    }

    /// Canonical path for routes that have one.
    #[must_use]
    pub fn path(self) -> Option<&'static str> {
        match self {
            Self::Login => Some(LOGIN_PATH),
            Self::Register => Some(REGISTER_PATH),
            Self::ForgotPassword => Some(FORGOT_PASSWORD_PATH),
            Self::ResetPassword => Some(RESET_PASSWORD_PATH),
            Self::Dashboard => Some(DASHBOARD_PATH),
            Self::Other => None,
        }
    }

    /// Login, register, forgot-password and reset-password.
    #[must_use]
    pub fn is_public_auth(self) -> bool {
        matches!(self, Self::Login | Self::Register | Self::ForgotPassword | Self::ResetPassword)
    }
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

fn is_dashboard(path: &str) -> bool {
    path.strip_prefix(DASHBOARD_PATH)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Outcome of evaluating the guard for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    RedirectToForgotPassword,
    RedirectToDashboard,
}

impl Decision {
    /// Redirect target, or `None` when the request passes through.
    #[must_use]
    pub fn location(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToForgotPassword => Some(FORGOT_PASSWORD_PATH),
            Self::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

/// Inputs the guard reads from a navigation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardRequest<'a> {
    pub path: &'a str,
    /// Value of the `token` query parameter, if any.
    pub reset_token: Option<&'a str>,
    /// Value of the session cookie, if any.
    pub session_token: Option<&'a str>,
}

impl<'a> GuardRequest<'a> {
    #[must_use]
    pub fn new(path: &'a str) -> Self {
        Self { path, reset_token: None, session_token: None }
    }

    #[must_use]
    pub fn with_reset_token(mut self, token: Option<&'a str>) -> Self {
        self.reset_token = token;
        self
    }

    #[must_use]
    pub fn with_session(mut self, token: Option<&'a str>) -> Self {
        self.session_token = token;
        self
    }
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Evaluate the guard decision table. First matching rule wins:
///
/// 1. reset-password with a reset token → allow
/// 2. reset-password without one → forgot-password
/// 3. no session and a dashboard route → login
/// 4. session and login/register/forgot-password → dashboard
/// 5. otherwise → allow
#[must_use]
pub fn evaluate(request: &GuardRequest<'_>) -> Decision {
    let route = Route::classify(request.path);
    let has_session = present(request.session_token);

    match route {
        Route::ResetPassword if present(request.reset_token) => Decision::Allow,
        Route::ResetPassword => Decision::RedirectToForgotPassword,
        Route::Dashboard if !has_session => Decision::RedirectToLogin,
        Route::Login | Route::Register | Route::ForgotPassword if has_session => Decision::RedirectToDashboard,
        _ => Decision::Allow,
    }
}
