//! Labelled input with an inline validation message.

use leptos::prelude::*;
use medinfo::validation::FieldErrors;

/// The message for `field`, tracked reactively.
pub fn error_for(errors: RwSignal<FieldErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.get(field).map(str::to_owned)))
}

/// Callback that drops the messages of `fields` when an input is edited.
pub fn clear_on_edit(errors: RwSignal<FieldErrors>, fields: &'static [&'static str]) -> Callback<()> {
    Callback::new(move |()| {
        if fields.iter().any(|f| errors.with_untracked(|e| e.get(f).is_some())) {
            errors.update(|e| {
                for field in fields {
                    e.clear(field);
                }
            });
        }
    })
}

/// Text input (or textarea when `multiline`) bound to `value`.
///
/// `on_edit` fires on every keystroke after `value` is updated so the page can
/// clear the field's validation error.
#[component]
pub fn FormField(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional)] multiline: bool,
    #[prop(optional)] on_edit: Option<Callback<()>>,
) -> impl IntoView {
    let id = format!("field-{name}");
    let input_type = input_type.unwrap_or_else(|| "text".to_owned());
    let placeholder = placeholder.unwrap_or_default();
    let on_input = move |ev: leptos::ev::Event| {
        value.set(event_target_value(&ev));
        if let Some(cb) = on_edit {
            cb.run(());
        }
    };
    let class = move || if error.get().is_some() { "form-field__input form-field__input--invalid" } else { "form-field__input" };

    let control = if multiline {
        view! {
            <textarea
                id=id.clone()
                name=name
                class=class
                rows="3"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=on_input
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                id=id.clone()
                name=name
                class=class
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=on_input
            />
        }
        .into_any()
    };

    view! {
        <div class="form-field">
            <label class="form-field__label" for=id>{label}</label>
            {control}
            <Show when=move || error.get().is_some()>
                <p class="form-field__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
