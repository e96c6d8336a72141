//! Persisted credential pair (`adminToken` + `adminData`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps these in `localStorage`, the CLI in a JSON file. Both go
//! through [`CredentialStore`] so the session service and the API client never
//! touch a concrete backend.
//!
//! The token and the serialized profile are always written together and
//! removed together; [`Credentials`] is the only writer.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StoreError;
use crate::types::AdminProfile;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "adminToken";
/// Storage key for the JSON-serialized admin profile.
pub const ADMIN_KEY: &str = "adminData";

/// Synchronous string key-value storage.
pub trait CredentialStore {
    /// Read a value, `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str);
}

/// A bearer token together with the profile it was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub admin: AdminProfile,
}

impl Credentials {
    /// Load the persisted pair. A missing half or an undecodable profile
    /// yields `None`.
    pub fn load<S: CredentialStore + ?Sized>(store: &S) -> Option<Self> {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let raw = store.get(ADMIN_KEY)?;
        let admin = serde_json::from_str::<AdminProfile>(&raw).ok()?;
        Some(Self { token, admin })
    }

    /// Persist both halves. On a failed second write the first is rolled
    /// back so a half pair is never left behind.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or either write fails.
    pub fn save<S: CredentialStore + ?Sized>(&self, store: &S) -> Result<(), StoreError> {
        let admin = serde_json::to_string(&self.admin).map_err(|e| StoreError::Encode(e.to_string()))?;
        store.set(TOKEN_KEY, &self.token)?;
        if let Err(e) = store.set(ADMIN_KEY, &admin) {
            store.remove(TOKEN_KEY);
            return Err(e);
        }
        Ok(())
    }

    /// Remove both halves.
    pub fn clear<S: CredentialStore + ?Sized>(store: &S) {
        store.remove(TOKEN_KEY);
        store.remove(ADMIN_KEY);
    }

    /// Whether either half is currently persisted.
    pub fn any_present<S: CredentialStore + ?Sized>(store: &S) -> bool {
        store.get(TOKEN_KEY).is_some() || store.get(ADMIN_KEY).is_some()
    }
}

/// Bearer token, if one is persisted.
pub fn stored_token<S: CredentialStore + ?Sized>(store: &S) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.is_empty())
}

/// In-process store; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries, for inspection.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}
