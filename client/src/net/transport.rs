//! `fetch`-backed [`Transport`] for the browser.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every request fails with [`UNAVAILABLE_MESSAGE`]; pages
//! only issue API calls from browser event handlers and effects.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use medinfo::{HttpRequest, HttpResponse, Transport, TransportError};

#[cfg(any(test, not(feature = "hydrate")))]
pub const UNAVAILABLE_MESSAGE: &str = "network requests are only available in the browser";

/// Sends API requests with the browser's `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            fetch(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError(UNAVAILABLE_MESSAGE.to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use gloo_net::http::Request;
    use medinfo::Method;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Patch => Request::patch(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let sent = match request.body {
        Some(body) => builder.body(body).map_err(network_error)?.send().await,
        None => builder.send().await,
    };
    let response = sent.map_err(network_error)?;
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    Ok(HttpResponse { status, body })
}

#[cfg(feature = "hydrate")]
fn network_error(err: gloo_net::Error) -> TransportError {
    log::warn!("fetch failed: {err}");
    TransportError(network_error_message(&err.to_string()))
}

/// Message shown when `fetch` itself fails. Browsers report CORS and offline
/// failures with opaque text, so those collapse to "Network Error".
#[cfg(any(test, feature = "hydrate"))]
fn network_error_message(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.contains("Failed to fetch") || raw.contains("NetworkError") {
        "Network Error".to_owned()
    } else {
        raw.to_owned()
    }
}
