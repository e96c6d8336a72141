//! Access decision for authenticated-only routes.
//!
//! The view layer renders whatever [`decide`] returns. Keeping the decision
//! here means the redirect rules are shared by the browser app and tests.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::session::{Session, SessionPhase};

/// Login page path.
pub const LOGIN_PATH: &str = "/login";

/// Where a successful login lands when no return target was given.
pub const DEFAULT_RETURN_PATH: &str = "/dashboard";

/// What a protected route should do for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup revalidation is still running; show a neutral placeholder.
    Wait,
    Render,
    Redirect { to: String },
}

/// Decide how to handle a visit to the protected `path`.
#[must_use]
pub fn decide(session: &Session, path: &str) -> GuardDecision {
    match session.phase {
        SessionPhase::Loading => GuardDecision::Wait,
        SessionPhase::Authenticated(_) => GuardDecision::Render,
        SessionPhase::Anonymous => GuardDecision::Redirect { to: login_redirect(path) },
    }
}

/// `/login?redirect=<path>` with the path query-encoded.
#[must_use]
pub fn login_redirect(path: &str) -> String {
    if safe_return_target(Some(path)) != path {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?redirect={}", encode_query_value(path))
}

/// Resolve the post-login destination.
///
/// Only same-origin relative paths are honoured; anything else, including
/// protocol-relative `//host` forms, falls back to [`DEFAULT_RETURN_PATH`].
#[must_use]
pub fn safe_return_target(requested: Option<&str>) -> String {
    let Some(raw) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_RETURN_PATH.to_owned();
    };
    let relative = raw.starts_with('/')
        && !raw.starts_with("//")
        && !raw.starts_with("/\\")
        && !raw.chars().any(char::is_control);
    if relative && raw != LOGIN_PATH && !raw.starts_with("/login?") {
        raw.to_owned()
    } else {
        DEFAULT_RETURN_PATH.to_owned()
    }
}

fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~' | b'/') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
