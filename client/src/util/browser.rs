//! Thin wrappers over browser APIs used by pages.
//!
//! Each helper no-ops on the server.

/// `window.confirm`; `false` when no window is available.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

/// Save `href` (typically a `data:` URL) under `filename` via a temporary
/// anchor element.
pub fn download(href: &str, filename: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Ok(link) = document.create_element("a") else {
            return;
        };
        let Ok(link) = link.dyn_into::<web_sys::HtmlAnchorElement>() else {
            return;
        };
        link.set_href(href);
        link.set_download(filename);
        if body.append_child(&link).is_ok() {
            link.click();
            let _ = body.remove_child(&link);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (href, filename);
    }
}

/// Reload the current document.
pub fn reload() {
    #[cfg(feature = "hydrate")]
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::warn!("reload failed: {e:?}");
        }
    }
}

/// How a [`share`] request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share sheet accepted the link.
    Shared,
    /// No share sheet; the URL went to the clipboard instead.
    Copied,
    /// Cancelled by the user or rejected by the browser.
    Failed,
}

/// Offer `url` through `navigator.share`, falling back to copying it to the
/// clipboard where the Web Share API is missing.
#[cfg_attr(not(feature = "hydrate"), allow(clippy::unused_async))]
pub async fn share(title: &str, text: &str, url: &str) -> ShareOutcome {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::JsFuture;

        let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
            return ShareOutcome::Failed;
        };
        let has_share = js_sys::Reflect::has(&navigator, &wasm_bindgen::JsValue::from_str("share")).unwrap_or(false);
        if has_share {
            let data = web_sys::ShareData::new();
            data.set_title(title);
            data.set_text(text);
            data.set_url(url);
            return match JsFuture::from(navigator.share_with_data(&data)).await {
                Ok(_) => ShareOutcome::Shared,
                Err(e) => {
                    log::debug!("share dismissed: {e:?}");
                    ShareOutcome::Failed
                }
            };
        }
        match JsFuture::from(navigator.clipboard().write_text(url)).await {
            Ok(_) => ShareOutcome::Copied,
            Err(e) => {
                log::warn!("clipboard write failed: {e:?}");
                ShareOutcome::Failed
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (title, text, url);
        ShareOutcome::Failed
    }
}
