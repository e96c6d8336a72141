//! HTTP client wrapper for the MedQR REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every remote call in the app goes through [`ApiClient`]. It attaches the
//! persisted bearer token, unwraps JSON bodies, and normalizes failures into
//! [`ApiError`]. The wire itself is a [`Transport`]: `gloo-net` in the
//! browser, `reqwest` in the CLI, a scripted fake in tests.
//!
//! SESSION EXPIRY
//! ==============
//! A `401` from any endpoint clears the persisted credentials once and fires
//! the registered expiry hooks. The client never navigates; the hosting layer
//! decides what an expired session means for the UI.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{ApiError, GENERIC_FAILURE_MESSAGE, TransportError};
use crate::store::{CredentialStore, Credentials, stored_token};
use crate::types::{
    AuthPayload, CreatedRecord, Envelope, InfoRecord, Language, LanguageList, LoginRequest, MePayload, NewInfoRecord,
    RecordPage, RecordView, SignupRequest, TranslateBatchRequest, TranslateRequest, Translated, TranslatedBatch,
};

/// HTTP verbs used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON-encoded body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name` case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status plus undecoded body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a request and returns whatever the server answered.
///
/// Implementations report only failures to obtain a response; non-2xx
/// statuses are returned as ordinary responses.
#[async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Callback fired after a `401` cleared the persisted credentials.
pub type ExpiryHook = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`ApiClient::on_session_expired`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// REST client bound to a transport, a credential store, and a base URL.
pub struct ApiClient<T, S> {
    transport: T,
    store: S,
    config: ApiConfig,
    hooks: Mutex<Vec<(HookId, ExpiryHook)>>,
    next_hook: AtomicU64,
}

impl<T: Transport, S: CredentialStore> ApiClient<T, S> {
    pub fn new(transport: T, store: S, config: ApiConfig) -> Self {
        Self { transport, store, config, hooks: Mutex::new(Vec::new()), next_hook: AtomicU64::new(1) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Register a hook fired whenever a `401` invalidates the session.
    pub fn on_session_expired(&self, hook: ExpiryHook) -> HookId {
        let id = HookId(self.next_hook.fetch_add(1, Ordering::Relaxed));
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner).push((id, hook));
        id
    }

    /// Unregister a hook. Unknown ids are ignored.
    pub fn remove_expiry_hook(&self, id: HookId) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(hook_id, _)| *hook_id != id);
    }

    /// Drop every registered hook.
    pub fn clear_expiry_hooks(&self) {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Issue a request and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures, non-2xx statuses
    /// (`401` as [`ApiError::SessionExpired`]), and non-JSON bodies.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.exchange(method, path, body).await.map(|(_, value)| value)
    }

    /// `POST /auth/signup`; the envelope is interpreted by the session service.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn signup(&self, profile: &SignupRequest) -> Result<Envelope<AuthPayload>, ApiError> {
        self.envelope(Method::Post, "/auth/signup", Some(encode(profile)?)).await.map(|(_, env)| env)
    }

    /// `POST /auth/login`; the envelope is interpreted by the session service.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Envelope<AuthPayload>, ApiError> {
        self.envelope(Method::Post, "/auth/login", Some(encode(credentials)?)).await.map(|(_, env)| env)
    }

    /// `GET /auth/me` with the persisted token.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn me(&self) -> Result<Envelope<MePayload>, ApiError> {
        self.envelope(Method::Get, "/auth/me", None).await.map(|(_, env)| env)
    }

    /// `GET /info?page&limit`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`]; a missing `data` is [`ApiError::Malformed`].
    pub async fn list_records(&self, page: u32, limit: u32) -> Result<RecordPage, ApiError> {
        let path = format!("/info?page={page}&limit={limit}");
        self.data(Method::Get, &path, None).await
    }

    /// `POST /info`; the service answers with the stored record and its QR code.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn create_record(&self, record: &NewInfoRecord) -> Result<CreatedRecord, ApiError> {
        self.data(Method::Post, "/info", Some(encode(record)?)).await
    }

    /// `GET /info/view/:uniqueId`; public, also counts as a view.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn record_by_unique_id(&self, unique_id: &str) -> Result<RecordView, ApiError> {
        let path = format!("/info/view/{}", encode_segment(unique_id));
        self.data(Method::Get, &path, None).await
    }

    /// `PUT /info/:id`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn update_record(&self, id: &str, record: &NewInfoRecord) -> Result<InfoRecord, ApiError> {
        let path = format!("/info/{}", encode_segment(id));
        let data: Value = self.data(Method::Put, &path, Some(encode(record)?)).await?;
        record_from_data(data)
    }

    /// `PATCH /info/:id/toggle`; flips `isActive`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn toggle_record(&self, id: &str) -> Result<InfoRecord, ApiError> {
        let path = format!("/info/{}/toggle", encode_segment(id));
        let data: Value = self.data(Method::Patch, &path, None).await?;
        record_from_data(data)
    }

    /// `DELETE /info/:id`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete_record(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/info/{}", encode_segment(id));
        let (status, env) = self.envelope::<Value>(Method::Delete, &path, None).await?;
        ensure_success(&env, status)
    }

    /// `POST /translate` for a single text.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ApiError> {
        let body = TranslateRequest { text: text.to_owned(), target_lang: target_lang.to_owned() };
        let translated: Translated = self.data(Method::Post, "/translate", Some(encode(&body)?)).await?;
        Ok(translated.translated_text)
    }

    /// `POST /translate/batch`; output order matches input order.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn translate_batch(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>, ApiError> {
        let body = TranslateBatchRequest { texts: texts.to_vec(), target_lang: target_lang.to_owned() };
        let batch: TranslatedBatch = self.data(Method::Post, "/translate/batch", Some(encode(&body)?)).await?;
        Ok(batch.translated_texts)
    }

    /// `GET /translate/languages`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn languages(&self) -> Result<Vec<Language>, ApiError> {
        let list: LanguageList = self.data(Method::Get, "/translate/languages", None).await?;
        Ok(list.languages)
    }

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.request(Method::Get, "/health", None).await
    }

    async fn envelope<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(u16, Envelope<R>), ApiError> {
        let (status, value) = self.exchange(method, path, body).await?;
        // 204 and other bodiless 2xx answers carry nothing to report.
        if value.is_null() {
            return Ok((status, Envelope { success: None, message: None, data: None, errors: None }));
        }
        let env = serde_json::from_value::<Envelope<R>>(value)
            .map_err(|e| ApiError::Malformed(format!("unexpected response shape: {e}")))?;
        Ok((status, env))
    }

    async fn data<R: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<R, ApiError> {
        let (status, env) = self.envelope::<R>(method, path, body).await?;
        ensure_success(&env, status)?;
        env.data
            .ok_or_else(|| ApiError::Malformed("response is missing `data`".to_owned()))
    }

    async fn exchange(&self, method: Method, path: &str, body: Option<Value>) -> Result<(u16, Value), ApiError> {
        let mut headers = vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("Accept".to_owned(), "application/json".to_owned()),
        ];
        if let Some(token) = stored_token(&self.store) {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        let request = HttpRequest {
            method,
            url: self.config.url(path),
            headers,
            body: body.map(|b| b.to_string()),
        };

        log::debug!("{method} {path}");
        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("{method} {path} failed: {e}");
            ApiError::from(e)
        })?;

        let status = response.status;
        let parsed = parse_body(&response.body);

        if status == 401 {
            let message = parsed
                .as_ref()
                .ok()
                .and_then(server_message)
                .unwrap_or_else(|| status_message(status));
            self.expire();
            return Err(ApiError::SessionExpired { message });
        }

        if !(200..300).contains(&status) {
            let body = parsed.ok();
            let message = body
                .as_ref()
                .and_then(server_message)
                .unwrap_or_else(|| status_message(status));
            let errors = body.and_then(|b| b.get("errors").cloned()).filter(|e| !e.is_null());
            log::debug!("{method} {path} -> {status}: {message}");
            return Err(ApiError::Remote { status, message, errors });
        }

        parsed
            .map(|value| (status, value))
            .map_err(|e| ApiError::Malformed(format!("invalid JSON response: {e}")))
    }

    fn expire(&self) {
        log::warn!("session rejected by server; clearing stored credentials");
        Credentials::clear(&self.store);
        let hooks: Vec<ExpiryHook> = self
            .hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, hook)| Arc::clone(hook))
            .collect();
        for hook in hooks {
            hook();
        }
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn parse_body(raw: &str) -> Result<Value, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(raw)
}

fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

fn ensure_success<R>(env: &Envelope<R>, status: u16) -> Result<(), ApiError> {
    if env.is_success() {
        return Ok(());
    }
    Err(ApiError::Remote {
        status,
        message: env.message.clone().unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned()),
        errors: env.errors.clone(),
    })
}

/// Update/toggle answer either `{ infoRecord }` or the bare record.
fn record_from_data(data: Value) -> Result<InfoRecord, ApiError> {
    let inner = match data {
        Value::Object(mut map) if map.contains_key("infoRecord") => map.remove("infoRecord").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| ApiError::Malformed(format!("unexpected record shape: {e}")))
}

/// Percent-encode a single path segment.
pub(crate) fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
