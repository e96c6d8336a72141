//! Route wrapper for authenticated-only pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors `medinfo::guard::decide`: wait while the session is resolving,
//! render for a signed-in admin, otherwise replace the history entry with
//! `/login?redirect=<path>`.

#[cfg(test)]
#[path = "protected_test.rs"]
mod protected_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use medinfo::guard::{GuardDecision, decide};

use crate::state::session::use_session;

/// Path plus query string, as the login page should return to it.
pub fn path_with_query(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let navigate = use_navigate();
    let pathname = location.pathname;
    let search = location.search;

    let decision = Memo::new(move |_| decide(&session.state.get(), &path_with_query(&pathname.get(), &search.get())));

    Effect::new(move || {
        if let GuardDecision::Redirect { to } = decision.get() {
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || {
                view! {
                    <div class="guard">
                        <p class="guard__message">
                            {move || {
                                if decision.get() == GuardDecision::Wait { "Loading..." } else { "Redirecting to login..." }
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
