//! `localStorage` credential store.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort browser-only behavior. Reads on the server see an
//! empty store, which keeps server rendering deterministic: every SSR pass
//! renders the unresolved session.

use medinfo::{CredentialStore, StoreError};

/// Persists the credential pair in `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or_else(|| StoreError::Unavailable("localStorage".to_owned()))?;
            storage.set_item(key, value).map_err(|e| StoreError::Write {
                key: key.to_owned(),
                message: e.as_string().unwrap_or_else(|| format!("{e:?}")),
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable("no browser storage during server rendering".to_owned()))
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}
