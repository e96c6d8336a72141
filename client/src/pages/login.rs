//! Admin login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or via the protected-route redirect, which appends
//! `?redirect=<path>`. Once the session is authenticated (either already or
//! after a successful submit) the page forwards to that path, or to
//! `/dashboard` when none was given.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use medinfo::LoginRequest;
use medinfo::guard::safe_return_target;
use medinfo::validation::{FieldErrors, field, validate_login};

use crate::components::alert::Alert;
use crate::components::form_field::{FormField, clear_on_edit, error_for};
use crate::components::layout::Layout;
use crate::state::session::use_session;

/// Where to go after login given the raw `redirect` query value.
pub fn return_target(redirect: Option<String>) -> String {
    safe_return_target(redirect.as_deref())
}

/// Login form as typed.
pub fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest { email: email.trim().to_owned(), password: password.to_owned() }
}

pub fn submit_label(pending: bool) -> &'static str {
    if pending { "Signing in..." } else { "Sign In" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let state = session.state;
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    let target = Memo::new(move |_| return_target(query.with(|q| q.get("redirect"))));

    Effect::new(move || {
        if state.with(|s| s.is_authenticated()) {
            navigate(&target.get_untracked(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(|s| s.pending) {
            return;
        }
        let request = login_request(&email.get_untracked(), &password.get_untracked());
        let found = validate_login(&request);
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        session.clear_error();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = session.login(request).await;
            log::debug!("login finished (success: {})", outcome.is_success());
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let server_error = Signal::derive(move || state.with(|s| s.error.clone().unwrap_or_default()));
    let dismiss = Callback::new(move |()| session.clear_error());

    view! {
        <Layout>
            <div class="auth-page">
                <div class="card auth-card">
                    <h2 class="auth-card__title">"Admin Login"</h2>
                    <p class="auth-card__subtitle">"Sign in to manage your QR codes"</p>

                    <Alert message=server_error on_close=dismiss/>

                    <form class="auth-form" on:submit=on_submit novalidate>
                        <FormField
                            label="Email Address"
                            name=field::EMAIL
                            input_type="email"
                            placeholder="you@example.com"
                            value=email
                            error=error_for(errors, field::EMAIL)
                            on_edit=clear_on_edit(errors, &[field::EMAIL])
                        />
                        <FormField
                            label="Password"
                            name=field::PASSWORD
                            input_type="password"
                            placeholder="Enter your password"
                            value=password
                            error=error_for(errors, field::PASSWORD)
                            on_edit=clear_on_edit(errors, &[field::PASSWORD])
                        />
                        <button class="btn btn--block" type="submit" disabled=move || state.with(|s| s.pending)>
                            {move || submit_label(state.with(|s| s.pending))}
                        </button>
                    </form>

                    <p class="auth-card__switch">
                        "Don't have an account? "
                        <a href="/signup">"Sign up here"</a>
                    </p>
                </div>
            </div>
        </Layout>
    }
}
