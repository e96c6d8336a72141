//! Page frame with the navigation header.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route renders inside [`Layout`]. The header reflects the session:
//! signed-in admins get dashboard/create links, a greeting, and logout;
//! visitors get login and sign-up links. The public record view hides the
//! header entirely.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::session::use_session;

/// Class for a nav link, highlighted when it points at the current path.
pub fn nav_link_class(link: &str, current_path: &str) -> &'static str {
    if link == current_path { "nav__link nav__link--active" } else { "nav__link" }
}

pub fn welcome_text(name: &str) -> String {
    format!("Welcome, {name}")
}

#[component]
pub fn Layout(#[prop(optional)] hide_navigation: bool, children: Children) -> impl IntoView {
    view! {
        <div class="layout">
            {(!hide_navigation).then(|| view! { <NavBar/> })}
            <main class="layout__main">{children()}</main>
        </div>
    }
}

/// Home link with a text mark; the bundle ships no image assets.
#[component]
fn Brand() -> impl IntoView {
    view! {
        <a href="/" class="nav__brand">
            <span class="nav__logo" aria-hidden="true">"⚕"</span>
            <span>"InfoMed"</span>
        </a>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let path = move || location.pathname.get();

    view! {
        <nav class="nav">
            <Brand/>
            {move || {
                match session.state.get().admin().cloned() {
                    Some(admin) => {
                        view! {
                            <div class="nav__links">
                                <a href="/dashboard" class=move || nav_link_class("/dashboard", &path())>
                                    "Dashboard"
                                </a>
                                <a href="/create" class=move || nav_link_class("/create", &path())>
                                    "Create QR"
                                </a>
                            </div>
                            <div class="nav__user">
                                <span class="nav__welcome">{welcome_text(&admin.name)}</span>
                                // The router performs the navigation home; logout only clears state.
                                <a href="/" class="btn btn--outline btn--sm" on:click=move |_| session.logout()>
                                    "Logout"
                                </a>
                            </div>
                        }
                            .into_any()
                    }
                    None => {
                        view! {
                            <div class="nav__user">
                                <a href="/login" class="nav__link">"Login"</a>
                                <a href="/signup" class="btn btn--sm">"Sign Up"</a>
                            </div>
                        }
                            .into_any()
                    }
                }
            }}
        </nav>
    }
}
