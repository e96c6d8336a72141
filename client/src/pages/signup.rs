//! Admin registration page.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use medinfo::guard::DEFAULT_RETURN_PATH;
use medinfo::validation::{FieldErrors, SignupForm, field, validate_signup};

use crate::components::alert::Alert;
use crate::components::form_field::{FormField, clear_on_edit, error_for};
use crate::components::layout::Layout;
use crate::state::session::use_session;

/// Fields whose messages go away when `edited` changes. A new password
/// invalidates any earlier "do not match" verdict.
pub fn fields_cleared_by(edited: &'static str) -> &'static [&'static str] {
    const NAME: &[&str] = &[field::NAME];
    const EMAIL: &[&str] = &[field::EMAIL];
    const PASSWORD: &[&str] = &[field::PASSWORD, field::CONFIRM_PASSWORD];
    const CONFIRM: &[&str] = &[field::CONFIRM_PASSWORD];
    match edited {
        field::NAME => NAME,
        field::EMAIL => EMAIL,
        field::PASSWORD => PASSWORD,
        _ => CONFIRM,
    }
}

pub fn submit_label(pending: bool) -> &'static str {
    if pending { "Creating account..." } else { "Create Account" }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = use_session();
    let state = session.state;
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    Effect::new(move || {
        if state.with(|s| s.is_authenticated()) {
            navigate(DEFAULT_RETURN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(|s| s.pending) {
            return;
        }
        let form = SignupForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        let found = validate_signup(&form);
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        session.clear_error();
        let request = form.to_request();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = session.signup(request).await;
            log::debug!("signup finished (success: {})", outcome.is_success());
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
                    <h2 class="auth-card__title">"Create Admin Account"</h2>
                    <p class="auth-card__subtitle">"Start creating QR codes for your medicines"</p>

                    <Alert message=server_error on_close=dismiss/>

                    <form class="auth-form" on:submit=on_submit novalidate>
                        <FormField
                            label="Full Name"
                            name=field::NAME
                            placeholder="John Doe"
                            value=name
                            error=error_for(errors, field::NAME)
                            on_edit=clear_on_edit(errors, fields_cleared_by(field::NAME))
                        />
                        <FormField
                            label="Email Address"
                            name=field::EMAIL
                            input_type="email"
                            placeholder="admin@example.com"
                            value=email
                            error=error_for(errors, field::EMAIL)
                            on_edit=clear_on_edit(errors, fields_cleared_by(field::EMAIL))
                        />
                        <FormField
                            label="Password"
                            name=field::PASSWORD
                            input_type="password"
                            placeholder="••••••••"
                            value=password
                            error=error_for(errors, field::PASSWORD)
                            on_edit=clear_on_edit(errors, fields_cleared_by(field::PASSWORD))
                        />
                        <FormField
                            label="Confirm Password"
                            name=field::CONFIRM_PASSWORD
                            input_type="password"
                            placeholder="••••••••"
                            value=confirm
                            error=error_for(errors, field::CONFIRM_PASSWORD)
                            on_edit=clear_on_edit(errors, fields_cleared_by(field::CONFIRM_PASSWORD))
                        />
                        <button class="btn btn--block" type="submit" disabled=move || state.with(|s| s.pending)>
                            {move || submit_label(state.with(|s| s.pending))}
                        </button>
                    </form>

                    <p class="auth-card__switch">
                        "Already have an account? "
                        <a href="/login">"Sign in here"</a>
                    </p>
                </div>
            </div>
        </Layout>
    }
}
