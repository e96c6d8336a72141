//! Catch-all route.

use leptos::prelude::*;

use crate::components::layout::Layout;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Layout>
            <div class="not-found">
                <h1>"404"</h1>
                <p>"Page not found."</p>
                <a href="/" class="btn">"Go Home"</a>
            </div>
        </Layout>
    }
}
