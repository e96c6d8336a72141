//! # medqr
//!
//! Axum host for the MedQR admin frontend: server-renders the Leptos app
//! from the `client` crate and serves its WASM/CSS bundle. All data lives
//! behind the external MedQR API, which the browser calls directly.

mod config;
mod routes;

use config::HostConfig;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "medqr host failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), config::ConfigError> {
    let config = HostConfig::from_env()?;
    let app = routes::app().map_err(config::ConfigError::Leptos)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| config::ConfigError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "medqr listening");
    axum::serve(listener, app)
        .await
        .map_err(|source| config::ConfigError::Serve { source })
}
