//! Record dashboard for the signed-in admin.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. Lists the admin's records ten at a time with
//! summary stats, and re-fetches the current page after every toggle or
//! delete so counts stay in step with the service.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use medinfo::records::{
    DELETE_CONFIRM_MESSAGE, DashboardStats, PAGE_LIMIT, display_date, page_numbers, status_label, toggle_label,
};
use medinfo::types::RecordPage;
use medinfo::{ApiError, InfoRecord};

use crate::components::alert::Alert;
use crate::components::layout::Layout;
use crate::components::protected::Protected;
use crate::state::session::use_session;
use crate::util::browser;

/// Link opened by the "View" button.
pub fn public_view_href(record: &InfoRecord) -> String {
    record
        .qr_code_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| format!("/view/{}", record.unique_id))
}

/// Message for a failed dashboard call. Expired sessions are handled by the
/// redirect, so they show nothing.
pub fn failure_message(err: &ApiError) -> Option<String> {
    (!err.is_session_expired()).then(|| err.message())
}

pub fn usage_preview(record: &InfoRecord) -> &str {
    if record.usage.trim().is_empty() { "No usage information provided" } else { &record.usage }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <Layout>
            <Protected>
                <DashboardContent/>
            </Protected>
        </Layout>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let session = use_session();
    let listing = RwSignal::new(RecordPage::default());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(String::new());

    let load = move |page: u32| {
        loading.set(true);
        error.set(String::new());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let service = session.service();
            match service.api().list_records(page, PAGE_LIMIT).await {
                Ok(fetched) => listing.set(fetched),
                Err(e) => error.set(failure_message(&e).unwrap_or_default()),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = page;
    };

    let current_page = move || u32::try_from(listing.with_untracked(|l| l.pagination.current)).unwrap_or(1).max(1);

    let toggle = move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let service = session.service();
            match service.api().toggle_record(&id).await {
                Ok(record) => {
                    log::info!("record {} is now {}", record.id, status_label(&record));
                    load(current_page());
                }
                Err(e) => error.set(failure_message(&e).unwrap_or_default()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    let delete = move |id: String| {
        if !browser::confirm(DELETE_CONFIRM_MESSAGE) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let service = session.service();
            match service.api().delete_record(&id).await {
                Ok(()) => load(current_page()),
                Err(e) => error.set(failure_message(&e).unwrap_or_default()),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    Effect::new(move || load(1));

    let stats = Memo::new(move |_| listing.with(DashboardStats::from_page));
    let admin_name = move || session.state.with(|s| s.admin().map(|a| a.name.clone()).unwrap_or_default());
    let dismiss = Callback::new(move |()| error.set(String::new()));

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <div>
                    <h1>"Welcome, " {admin_name}</h1>
                    <p class="dashboard__lead">"Manage your QR codes and medicine information"</p>
                </div>
                <a href="/create" class="btn btn--lg">"Create New QR Code"</a>
            </header>

            <Alert message=error on_close=dismiss/>

            <section class="stats">
                <div class="card stats__card">
                    <p class="stats__label">"Total Records"</p>
                    <p class="stats__value">{move || stats.get().total}</p>
                </div>
                <div class="card stats__card">
                    <p class="stats__label">"Active Records"</p>
                    <p class="stats__value">{move || stats.get().active_on_page}</p>
                </div>
                <div class="card stats__card">
                    <p class="stats__label">"Total Views"</p>
                    <p class="stats__value">{move || stats.get().views_on_page}</p>
                </div>
            </section>

            <h2>"Your QR Codes"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <p class="dashboard__loading">"Loading records..."</p> }>
                <Show
                    when=move || listing.with(|l| !l.info_records.is_empty())
                    fallback=|| {
                        view! {
                            <div class="card dashboard__empty">
                                <h3>"No records yet"</h3>
                                <p>"Get started by creating your first QR code."</p>
                                <a href="/create" class="btn">"Create QR Code"</a>
                            </div>
                        }
                    }
                >
                    <ul class="records">
                        {move || {
                            listing
                                .get()
                                .info_records
                                .into_iter()
                                .map(|record| {
                                    let toggle_id = record.id.clone();
                                    let delete_id = record.id.clone();
                                    let badge = if record.is_active { "badge badge--active" } else { "badge badge--inactive" };
                                    view! {
                                        <li class="card record">
                                            <div class="record__body">
                                                <h3 class="record__name">
                                                    {record.medicine_name.clone()}
                                                    <span class=badge>{status_label(&record)}</span>
                                                </h3>
                                                <p class="record__usage">{usage_preview(&record).to_owned()}</p>
                                                <p class="record__meta">
                                                    <span>
                                                        "Created: "
                                                        {record.created_at.as_deref().map(display_date).unwrap_or("-").to_owned()}
                                                    </span>
                                                    <span>"Views: " {record.view_count}</span>
                                                    {record
                                                        .last_viewed
                                                        .as_deref()
                                                        .map(|seen| {
                                                            view! { <span>"Last viewed: " {display_date(seen).to_owned()}</span> }
                                                        })}
                                                </p>
                                            </div>
                                            <div class="record__actions">
                                                <a
                                                    class="btn btn--outline btn--sm"
                                                    href=public_view_href(&record)
                                                    target="_blank"
                                                    rel="noopener noreferrer"
                                                >
                                                    "View"
                                                </a>
                                                <button
                                                    class="btn btn--secondary btn--sm"
                                                    on:click=move |_| toggle(toggle_id.clone())
                                                >
                                                    {toggle_label(&record)}
                                                </button>
                                                <button
                                                    class="btn btn--danger btn--sm"
                                                    on:click=move |_| delete(delete_id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </div>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <nav class="pagination">
                        {move || {
                            let current = listing.with(|l| l.pagination.current);
                            listing
                                .with(page_numbers)
                                .into_iter()
                                .map(|page| {
                                    let class = if i64::from(page) == current {
                                        "btn btn--sm pagination__page--current"
                                    } else {
                                        "btn btn--outline btn--sm"
                                    };
                                    view! {
                                        <button class=class on:click=move |_| load(page)>
                                            {page}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </nav>
                </Show>
            </Show>
        </div>
    }
}
