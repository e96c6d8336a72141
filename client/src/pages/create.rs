//! New record form and QR result.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated route. Submits the ten medicine fields; the service stores
//! the record and answers with a QR image that encodes the public view URL.

#[cfg(test)]
#[path = "create_test.rs"]
mod create_test;

use leptos::prelude::*;
use medinfo::records::{display_date, qr_filename};
use medinfo::types::CreatedRecord;
use medinfo::validation::{FieldErrors, field, validate_record};
use medinfo::{InfoRecord, NewInfoRecord};

use crate::components::alert::{Alert, AlertKind};
use crate::components::form_field::{FormField, error_for};
use crate::components::layout::Layout;
use crate::components::protected::Protected;
use crate::state::session::use_session;
use crate::util::browser;

/// How one medicine field is presented in the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input_type: &'static str,
    pub multiline: bool,
}

const fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec { name, label, placeholder, input_type: "text", multiline: false }
}

const fn area(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec { name, label, placeholder, input_type: "text", multiline: true }
}

const fn date(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label, placeholder: "", input_type: "date", multiline: false }
}

/// Form fields in display order.
pub const FIELD_SPECS: [FieldSpec; 10] = [
    text(field::MEDICINE_NAME, "Medicine Name", "e.g., Paracetamol"),
    area(field::USAGE, "Usage/Purpose", "What is this medicine used for?"),
    area(field::DOSAGE, "Dosage Instructions", "How should this medicine be taken?"),
    area(field::DRUGS, "Drug Composition", "Active ingredients and composition"),
    date(field::MAN, "Manufacturing Date"),
    date(field::EXP, "Expiry Date"),
    text(field::PRICE, "Price", "e.g., ₹25.00"),
    text(field::BTNO, "Batch Number", "e.g., BT001234"),
    text(field::COMP_NAME, "Company Name", "e.g., ABC Pharmaceuticals"),
    area(field::INSTR, "Storage Instructions", "How should this medicine be stored?"),
];

fn slot<'a>(record: &'a mut NewInfoRecord, name: &str) -> Option<&'a mut String> {
    Some(match name {
        field::MEDICINE_NAME => &mut record.medicine_name,
        field::USAGE => &mut record.usage,
        field::DOSAGE => &mut record.dosage,
        field::EXP => &mut record.exp,
        field::MAN => &mut record.man,
        field::PRICE => &mut record.price,
        field::BTNO => &mut record.btno,
        field::COMP_NAME => &mut record.comp_name,
        field::INSTR => &mut record.instr,
        field::DRUGS => &mut record.drugs,
        _ => return None,
    })
}

/// Assemble the request body from `(field name, value)` pairs. Unknown names
/// are ignored.
pub fn record_from_values<I>(values: I) -> NewInfoRecord
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    let mut record = NewInfoRecord::default();
    for (name, value) in values {
        if let Some(target) = slot(&mut record, name) {
            *target = value;
        }
    }
    record
}

/// Label/value pairs shown under the generated QR code.
pub fn detail_rows(record: &InfoRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Medicine Name", record.medicine_name.clone()),
        ("Usage/Purpose", record.usage.clone()),
        ("Dosage Instructions", record.dosage.clone()),
        ("Expiry Date", record.exp.clone()),
        ("Manufacture Date", record.man.clone()),
        ("Price", record.price.clone()),
        ("Batch Number", record.btno.clone()),
        ("Manufacturer/Company Name", record.comp_name.clone()),
        ("Storage Instructions", record.instr.clone()),
        ("Drugs", record.drugs.clone()),
    ]
}

#[component]
pub fn CreatePage() -> impl IntoView {
    view! {
        <Layout>
            <Protected>
                <CreateContent/>
            </Protected>
        </Layout>
    }
}

#[component]
fn CreateContent() -> impl IntoView {
    let session = use_session();
    let values = FIELD_SPECS.map(|_| RwSignal::new(String::new()));
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let created = RwSignal::new(None::<CreatedRecord>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let record = record_from_values(FIELD_SPECS.iter().zip(values).map(|(spec, v)| (spec.name, v.get_untracked())));
        let found = validate_record(&record);
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        error.set(String::new());
        submitting.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let service = session.service();
            match service.api().create_record(&record).await {
                Ok(result) => {
                    log::info!("created record {}", result.info_record.unique_id);
                    for value in values {
                        value.set(String::new());
                    }
                    created.set(Some(result));
                }
                Err(e) if e.is_session_expired() => {}
                Err(e) => error.set(e.message()),
            }
            submitting.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (record, session);
    };

    let dismiss = Callback::new(move |()| error.set(String::new()));

    let form = move || {
        let fields = FIELD_SPECS
            .iter()
            .zip(values)
            .map(|(spec, value)| {
                let name = spec.name;
                let on_edit = Callback::new(move |()| {
                    if errors.with_untracked(|e| e.get(name).is_some()) {
                        errors.update(|e| {
                            e.clear(name);
                        });
                    }
                    if !error.with_untracked(String::is_empty) {
                        error.set(String::new());
                    }
                });
                view! {
                    <FormField
                        label=spec.label
                        name=spec.name
                        input_type=spec.input_type
                        placeholder=spec.placeholder
                        multiline=spec.multiline
                        value=value
                        error=error_for(errors, name)
                        on_edit=on_edit
                    />
                }
            })
            .collect_view();

        view! {
            <div class="create">
                <h1>"Create Medicine QR Code"</h1>
                <p class="create__lead">"Fill in the medicine details to generate a QR code"</p>
                <Alert message=error on_close=dismiss/>
                <form class="card create__form" on:submit=on_submit novalidate>
                    <div class="create__grid">{fields}</div>
                    <button class="btn btn--block" type="submit" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Generating QR Code..." } else { "Generate QR Code" }}
                    </button>
                </form>
            </div>
        }
    };

    view! {
        <Show when=move || created.with(Option::is_some) fallback=form>
            {move || created.get().map(|result| view! { <CreatedView result=result created=created/> })}
        </Show>
    }
}

#[component]
fn CreatedView(result: CreatedRecord, created: RwSignal<Option<CreatedRecord>>) -> impl IntoView {
    let record = result.info_record;
    let filename = qr_filename(&record.medicine_name);
    let image = result.qr_code_data_url.unwrap_or_default();
    let download_href = image.clone();
    let public_url = result.qr_code_url.or(record.qr_code_url.clone()).unwrap_or_default();
    let created_on = record.created_at.as_deref().map(display_date).unwrap_or("-").to_owned();

    let rows = detail_rows(&record)
        .into_iter()
        .map(|(label, value)| {
            view! {
                <div class="details__row">
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="created">
            <Alert kind=AlertKind::Success message="QR code generated successfully!".to_owned()/>
            <div class="created__grid">
                <section class="card created__qr">
                    <h3>"Your QR Code"</h3>
                    <img src=image alt="Generated QR code" class="created__image"/>
                    <button class="btn" type="button" on:click=move |_| browser::download(&download_href, &filename)>
                        "Download QR Code"
                    </button>
                    <p class="created__url">
                        "URL: "
                        <a href=public_url.clone() target="_blank" rel="noopener noreferrer">{public_url.clone()}</a>
                    </p>
                </section>
                <section class="card details">
                    <h3>"Record Details"</h3>
                    <dl>{rows}</dl>
                    <p class="details__meta">"Created: " {created_on}</p>
                    <p class="details__meta">"Status: Active"</p>
                </section>
            </div>
            <div class="created__actions">
                <button class="btn" type="button" on:click=move |_| created.set(None)>
                    "Create Another"
                </button>
                <a href="/dashboard" class="btn btn--outline">"View Dashboard"</a>
            </div>
        </div>
    }
}
