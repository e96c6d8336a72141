//! Scripted transport and instrumented store for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{HttpRequest, HttpResponse, Transport};
use crate::error::{StoreError, TransportError};
use crate::store::{CredentialStore, MemoryStore, TOKEN_KEY};
use crate::types::AdminProfile;

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body: body.to_owned() }));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_owned())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_owned())))
    }
}

/// [`MemoryStore`] that counts writes and token removals.
#[derive(Clone, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: Arc<AtomicUsize>,
    token_removals: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn token_removals(&self) -> usize {
        self.token_removals.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl CredentialStore for CountingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        if key == TOKEN_KEY && self.inner.get(key).is_some() {
            self.token_removals.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.remove(key);
    }
}

pub fn admin(id: &str, name: &str) -> AdminProfile {
    AdminProfile {
        id: id.to_owned(),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        created_at: None,
    }
}

pub fn admin_json(admin: &AdminProfile) -> Value {
    serde_json::to_value(admin).unwrap()
}
