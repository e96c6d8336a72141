//! Session context for the browser app.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds one [`SessionContext`], starts it, and provides it to every
//! route. The `medinfo` session service stays the single owner of login
//! state; this module mirrors each change into an `RwSignal` so views can
//! react, and raises [`SessionContext::expired`] when the server rejects the
//! stored token.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;
use medinfo::client::HookId;
use medinfo::config::DEFAULT_API_URL;
use medinfo::{ApiClient, ApiConfig, AuthOutcome, LoginRequest, Session, SessionService, SignupRequest};

use crate::net::storage::BrowserStorage;
use crate::net::transport::BrowserTransport;

pub type AppSession = SessionService<BrowserTransport, BrowserStorage>;

/// API location baked in at build time from `MEDQR_API_URL`.
pub fn api_config() -> ApiConfig {
    ApiConfig::new(option_env!("MEDQR_API_URL").unwrap_or(DEFAULT_API_URL))
}

/// Session service plus the signals views subscribe to.
#[derive(Clone, Copy)]
pub struct SessionContext {
    service: StoredValue<Arc<AppSession>>,
    /// Latest session snapshot.
    pub state: RwSignal<Session>,
    /// Raised after a `401` cleared the stored credentials.
    pub expired: RwSignal<bool>,
    expiry_hook: HookId,
}

impl SessionContext {
    pub fn new() -> Self {
        let api = ApiClient::new(BrowserTransport, BrowserStorage, api_config());
        let service = Arc::new(SessionService::new(api));
        let state = RwSignal::new(service.session());
        let expired = RwSignal::new(false);

        service.subscribe(Arc::new(move |session: &Session| state.set(session.clone())));
        let expiry_hook = service.api().on_session_expired(Arc::new(move || expired.set(true)));

        Self { service: StoredValue::new(service), state, expired, expiry_hook }
    }

    /// Handle to the underlying service, for use across `.await`s.
    pub fn service(&self) -> Arc<AppSession> {
        self.service.get_value()
    }

    /// Revalidate the stored token in the background.
    pub fn start(&self) {
        #[cfg(feature = "hydrate")]
        {
            let service = self.service();
            leptos::task::spawn_local(async move {
                let session = service.init().await;
                log::debug!("session resolved (authenticated: {})", session.is_authenticated());
            });
        }
    }

    pub fn stop(&self) {
        let service = self.service();
        service.api().remove_expiry_hook(self.expiry_hook);
        service.teardown();
    }

    pub async fn login(&self, credentials: LoginRequest) -> AuthOutcome {
        self.service().login(&credentials).await
    }

    pub async fn signup(&self, profile: SignupRequest) -> AuthOutcome {
        self.service().signup(&profile).await
    }

    pub fn logout(&self) {
        self.service.with_value(|service| service.logout());
    }

    pub fn clear_error(&self) {
        self.service.with_value(|service| service.clear_error());
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The session provided by `App`.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
