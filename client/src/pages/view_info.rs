//! Public medicine page reached by scanning a QR code.
//!
//! SYSTEM CONTEXT
//! ==============
//! No login required. Fetches the record by its public id plus the language
//! list; picking a language other than English machine-translates the
//! descriptive fields through the batch endpoint. Any translation failure
//! falls back to the stored text.

#[cfg(test)]
#[path = "view_info_test.rs"]
mod view_info_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use medinfo::InfoRecord;
use medinfo::records::qr_filename;
use medinfo::translation::{
    NOTHING_TO_TRANSLATE_MESSAGE, ORIGINAL_LANGUAGE, language_name, merge_translation, translatable_texts,
    translation_failed_message,
};
use medinfo::types::{Language, RecordView};

use crate::components::alert::{Alert, AlertKind};
use crate::components::layout::Layout;
use crate::state::session::use_session;
use crate::util::browser::{self, ShareOutcome};

/// Selector entries as `(code, label)`: the original first under its own
/// label, then every other language, all sorted by label.
pub fn language_options(languages: &[Language]) -> Vec<(String, String)> {
    let mut options: Vec<(String, String)> = std::iter::once((ORIGINAL_LANGUAGE.to_owned(), "English (Original)".to_owned()))
        .chain(
            languages
                .iter()
                .filter(|lang| lang.code != ORIGINAL_LANGUAGE)
                .map(|lang| (lang.code.clone(), lang.name.clone())),
        )
        .collect();
    options.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));
    options
}

/// Caption under the selector.
pub fn language_caption(languages: &[Language], code: &str) -> String {
    if code == ORIGINAL_LANGUAGE {
        "Content is currently displayed in English".to_owned()
    } else {
        format!("Medicine information translated to {}", language_name(languages, code))
    }
}

pub const LINK_COPIED_MESSAGE: &str = "QR code URL copied to clipboard!";

/// Title and text handed to the share sheet for a record.
pub fn share_details(medicine_name: &str) -> (String, String) {
    (format!("QR Code - {medicine_name}"), format!("View medicine information for {medicine_name}"))
}

/// What the page is showing.
#[derive(Clone, Debug, Default, PartialEq)]
enum LoadState {
    #[default]
    Loading,
    Failed(String),
    Missing,
    Loaded(RecordView),
}

#[component]
pub fn ViewInfoPage() -> impl IntoView {
    let session = use_session();
    let params = use_params_map();
    let unique_id = move || params.with(|p| p.get("uniqueId")).unwrap_or_default();

    let state = RwSignal::new(LoadState::Loading);
    let languages = RwSignal::new(Vec::<Language>::new());
    let selected = RwSignal::new(ORIGINAL_LANGUAGE.to_owned());
    let translated = RwSignal::new(None::<InfoRecord>);
    let translating = RwSignal::new(false);
    let notice = RwSignal::new(String::new());

    Effect::new(move || {
        let id = unique_id();
        state.set(LoadState::Loading);
        translated.set(None);
        selected.set(ORIGINAL_LANGUAGE.to_owned());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let service = session.service();
            if id.is_empty() {
                state.set(LoadState::Missing);
            } else {
                match service.api().record_by_unique_id(&id).await {
                    Ok(view) => state.set(LoadState::Loaded(view)),
                    Err(e) if e.status() == Some(404) => state.set(LoadState::Missing),
                    Err(e) => state.set(LoadState::Failed(e.message())),
                }
            }
            match service.api().languages().await {
                Ok(list) => languages.set(list),
                Err(e) => log::warn!("failed to fetch languages: {e}"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, session);
    });

    let on_language = move |ev: leptos::ev::Event| {
        let code = event_target_value(&ev);
        selected.set(code.clone());
        notice.set(String::new());

        let LoadState::Loaded(view) = state.get_untracked() else {
            return;
        };
        if code == ORIGINAL_LANGUAGE {
            translated.set(None);
            return;
        }
        let record = view.info_record;
        let batch = translatable_texts(&record);
        if batch.is_empty() {
            notice.set(NOTHING_TO_TRANSLATE_MESSAGE.to_owned());
            return;
        }

        translating.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let service = session.service();
            match service.api().translate_batch(&batch.texts, &code).await {
                Ok(texts) => translated.set(Some(merge_translation(&record, &batch, &texts))),
                Err(e) => {
                    log::warn!("translation to {code} failed: {e}");
                    notice.set(languages.with_untracked(|langs| translation_failed_message(langs, &code)));
                    translated.set(None);
                    selected.set(ORIGINAL_LANGUAGE.to_owned());
                }
            }
            translating.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (record, batch, session);
    };

    let dismiss = Callback::new(move |()| notice.set(String::new()));
    let share_notice = RwSignal::new(String::new());
    let dismiss_share = Callback::new(move |()| share_notice.set(String::new()));

    let body = move || match state.get() {
        LoadState::Loading => view! {
            <div class="view-info__status">
                <p>"Loading information..."</p>
            </div>
        }
        .into_any(),
        LoadState::Failed(message) => view! {
            <div class="view-info__status">
                <Alert message=message/>
                <button class="btn" type="button" on:click=move |_| browser::reload()>"Try Again"</button>
            </div>
        }
        .into_any(),
        LoadState::Missing => view! {
            <div class="card view-info__status">
                <h2>"Information Not Found"</h2>
                <p>"The QR code you scanned might be invalid or the information has been removed."</p>
            </div>
        }
        .into_any(),
        LoadState::Loaded(view) => {
            let original = view.info_record.clone();
            let shown = move || translated.get().unwrap_or_else(|| original.clone());
            let image = view.qr_code_image.clone().unwrap_or_default();
            let filename = qr_filename(&view.info_record.medicine_name);
            let download_href = image.clone();
            let public_url = view.qr_code_url.clone().or(view.info_record.qr_code_url.clone()).unwrap_or_default();
            let (share_title, share_text) = share_details(&view.info_record.medicine_name);
            let share_url = public_url.clone();
            let on_share = move |_: leptos::ev::MouseEvent| {
                let (title, text, url) = (share_title.clone(), share_text.clone(), share_url.clone());
                share_notice.set(String::new());
                leptos::task::spawn_local(async move {
                    if browser::share(&title, &text, &url).await == ShareOutcome::Copied {
                        share_notice.set(LINK_COPIED_MESSAGE.to_owned());
                    }
                });
            };

            view! {
                <div class="view-info">
                    <section class="card language">
                        <h3>"Choose Language"</h3>
                        <p class="language__caption">
                            {move || languages.with(|langs| language_caption(langs, &selected.get()))}
                        </p>
                        <select
                            class="language__select"
                            disabled=move || translating.get()
                            prop:value=move || selected.get()
                            on:change=on_language
                        >
                            {move || {
                                languages
                                    .with(|langs| language_options(langs))
                                    .into_iter()
                                    .map(|(code, label)| view! { <option value=code>{label}</option> })
                                    .collect_view()
                            }}
                        </select>
                        <Show when=move || translating.get()>
                            <span class="language__busy">"Translating..."</span>
                        </Show>
                    </section>

                    <Alert message=notice on_close=dismiss/>

                    <section class="card qr">
                        <img src=image alt="Medicine QR code" class="qr__image"/>
                        <h4>"Scan to View Medicine Details"</h4>
                        <button class="btn" type="button" on:click=move |_| browser::download(&download_href, &filename)>
                            "Download QR"
                        </button>
                        <button class="btn btn--outline" type="button" on:click=on_share>
                            "Share QR Code"
                        </button>
                        <Alert kind=AlertKind::Info message=share_notice on_close=dismiss_share/>
                        <p class="qr__url">"QR Code URL: " <span>{public_url}</span></p>
                    </section>

                    <MedicineDetails record=Signal::derive(shown)/>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <Layout hide_navigation=true>
            {body}
        </Layout>
    }
}

#[component]
fn MedicineDetails(#[prop(into)] record: Signal<InfoRecord>) -> impl IntoView {
    view! {
        <section class="card details">
            <h2>"Medicine Information"</h2>
            <h3 class="details__name">{field_text(record, |r| &r.medicine_name)}</h3>
            <h4>"Usage/Purpose"</h4>
            <p>{field_text(record, |r| &r.usage)}</p>
            <h4>"Dosage Instructions"</h4>
            <p class="details__pre">{field_text(record, |r| &r.dosage)}</p>
            <h4>"Drug Composition"</h4>
            <p class="details__pre">{field_text(record, |r| &r.drugs)}</p>
        </section>
        <section class="card details">
            <h2>"Product Details"</h2>
            <dl>
                <div class="details__row"><dt>"Manufacturing Date"</dt><dd>{field_text(record, |r| &r.man)}</dd></div>
                <div class="details__row"><dt>"Expiry Date"</dt><dd>{field_text(record, |r| &r.exp)}</dd></div>
                <div class="details__row"><dt>"Price"</dt><dd>{field_text(record, |r| &r.price)}</dd></div>
                <div class="details__row"><dt>"Batch Number"</dt><dd>{field_text(record, |r| &r.btno)}</dd></div>
                <div class="details__row"><dt>"Manufacturer"</dt><dd>{field_text(record, |r| &r.comp_name)}</dd></div>
            </dl>
            <h4>"Storage Instructions"</h4>
            <p class="details__pre">{field_text(record, |r| &r.instr)}</p>
        </section>
    }
}

fn field_text(record: Signal<InfoRecord>, get: fn(&InfoRecord) -> &String) -> impl Fn() -> String + Copy + Send + Sync {
    move || record.with(|r| get(r).clone())
}
