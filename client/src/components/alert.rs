//! Inline status banner.

use leptos::prelude::*;

/// Visual tone of an [`Alert`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Error,
    Success,
    Info,
}

impl AlertKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "alert alert--error",
            Self::Success => "alert alert--success",
            Self::Info => "alert alert--info",
        }
    }
}

/// Message banner. When `on_close` is given a dismiss button is shown.
#[component]
pub fn Alert(
    #[prop(optional)] kind: AlertKind,
    #[prop(into)] message: Signal<String>,
    #[prop(optional)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || !message.get().is_empty()>
            <div class=kind.class() role="alert">
                <span class="alert__message">{move || message.get()}</span>
                {on_close
                    .map(|close| {
                        view! {
                            <button
                                class="alert__close"
                                type="button"
                                aria-label="Dismiss"
                                on:click=move |_| close.run(())
                            >
                                "×"
                            </button>
                        }
                    })}
            </div>
        </Show>
    }
}
