//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! A rejected token can surface from any page. The app reacts the same way
//! everywhere: forget the session and go to `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use medinfo::guard::{LOGIN_PATH, login_redirect};

/// Whether the expired flag should trigger navigation from `current_path`.
pub fn should_redirect_after_expiry(expired: bool, current_path: &str) -> bool {
    let pathname = current_path.split_once('?').map_or(current_path, |(path, _)| path);
    expired && pathname != LOGIN_PATH
}

/// Login URL carrying `current_path` as the return target, matching what
/// the protected-route wrapper produces for the same page.
pub fn expiry_target(current_path: &str) -> String {
    login_redirect(current_path)
}

/// Navigate to `/login?redirect=<path>` whenever the session expiry flag is
/// raised. `current_path` yields the path plus query string.
pub fn install_expiry_redirect<F, P>(expired: RwSignal<bool>, current_path: P, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
    P: Fn() -> String + 'static,
{
    Effect::new(move || {
        if !expired.get() {
            return;
        }
        let path = current_path();
        expired.set(false);
        if should_redirect_after_expiry(true, &path) {
            navigate(&expiry_target(&path), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
