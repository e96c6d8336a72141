//! # client
//!
//! Leptos + WASM admin frontend for MedQR.
//!
//! Pages, layout, and the protected-route wrapper live here, along with the
//! browser side of the [`medinfo`] core: a `gloo-net` transport and a
//! `localStorage` credential store. Everything else (session state machine,
//! API client, validation) comes from `medinfo`.

#![recursion_limit = "256"]
pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("medqr client hydrating");
    leptos::mount::hydrate_body(app::App);
}
