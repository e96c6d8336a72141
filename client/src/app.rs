//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::components::protected::path_with_query;
use crate::pages::{
    create::CreatePage, dashboard::DashboardPage, home::HomePage, login::LoginPage, not_found::NotFoundPage,
    signup::SignupPage, view_info::ViewInfoPage,
};
use crate::state::session::SessionContext;
use crate::util::auth::install_expiry_redirect;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the one [`SessionContext`] for the page lifetime and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::new();
    provide_context(session);
    session.start();
    on_cleanup(move || session.stop());

    view! {
        <Stylesheet id="leptos" href="/pkg/medqr.css"/>
        <Title text="InfoMed"/>

        <Router>
            <ExpiryRedirect session/>
            <Routes fallback=NotFoundPage>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=(StaticSegment("view"), ParamSegment("uniqueId")) view=ViewInfoPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("create") view=CreatePage/>
            </Routes>
        </Router>
    }
}

/// Sends the browser to `/login?redirect=<path>` once a request reports an
/// expired token. Lives inside the router so navigation hooks are available.
#[component]
fn ExpiryRedirect(session: SessionContext) -> impl IntoView {
    let navigate = use_navigate();
    let location = use_location();
    let (pathname, search) = (location.pathname, location.search);
    install_expiry_redirect(
        session.expired,
        move || path_with_query(&pathname.get_untracked(), &search.get_untracked()),
        navigate,
    );
}
