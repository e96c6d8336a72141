//! Session service: the injected owner of login state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosting app constructs one [`SessionService`] at startup, calls
//! [`SessionService::init`] to revalidate any persisted token, hands it to
//! the view layer, and calls [`SessionService::teardown`] on shutdown.
//! Observers registered with [`SessionService::subscribe`] see every state
//! change.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures stop here. `login` and `signup` always return an
//! [`AuthOutcome`]; the message is also recorded in `Session::error`.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::client::{ApiClient, HookId, Transport};
use crate::error::ApiError;
use crate::session::{Session, SessionAction, SessionPhase};
use crate::store::{CredentialStore, Credentials};
use crate::types::{AdminProfile, AuthPayload, Envelope, LoginRequest, MePayload, SignupRequest};

/// Reported when a successful auth response lacks the profile or token.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Invalid response: missing admin or token";

/// Callback receiving the session after each change.
pub type SessionListener = Arc<dyn Fn(&Session) + Send + Sync>;

/// Result of a login or signup attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Success(AdminProfile),
    Failure { error: String },
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error } => Some(error),
        }
    }
}

#[derive(Default)]
struct SessionCell {
    session: Mutex<Session>,
    listeners: Mutex<Vec<SessionListener>>,
}

impl SessionCell {
    fn current(&self) -> Session {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn dispatch(&self, action: SessionAction) -> Session {
        let (next, changed) = {
            let mut guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);
            let next = guard.apply(action);
            let changed = next != *guard;
            *guard = next.clone();
            (next, changed)
        };
        if changed {
            let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner).clone();
            for listener in listeners {
                listener(&next);
            }
        }
        next
    }
}

/// Drives the session state machine against the remote API.
pub struct SessionService<T, S> {
    api: ApiClient<T, S>,
    cell: Arc<SessionCell>,
    expiry_hook: Mutex<Option<HookId>>,
}

impl<T: Transport, S: CredentialStore> SessionService<T, S> {
    /// Wrap an API client. The session starts in `Loading` until [`Self::init`].
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self { api, cell: Arc::new(SessionCell::default()), expiry_hook: Mutex::new(None) }
    }

    /// The HTTP client, for record and translation calls.
    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.cell.current()
    }

    /// Observe every subsequent state change.
    pub fn subscribe(&self, listener: SessionListener) {
        self.cell.listeners.lock().unwrap_or_else(PoisonError::into_inner).push(listener);
    }

    /// Start the service: watch for `401`s and revalidate the persisted token.
    ///
    /// With no complete persisted pair this resolves to anonymous without any
    /// network call. A failed verification removes the persisted pair.
    pub async fn init(&self) -> Session {
        self.install_expiry_hook();

        let store = self.api.store();
        let Some(stored) = Credentials::load(store) else {
            if Credentials::any_present(store) {
                log::warn!("discarding incomplete stored session");
                Credentials::clear(store);
            }
            return self.cell.dispatch(SessionAction::Restored(None));
        };

        let verified = self.api.me().await.and_then(verified_admin);
        if self.cell.current().phase != SessionPhase::Loading {
            log::debug!("session settled during revalidation; keeping it");
            return self.cell.current();
        }
        match verified {
            Ok(admin) => {
                let refreshed = Credentials { token: stored.token, admin: admin.clone() };
                if let Err(e) = refreshed.save(store) {
                    log::warn!("failed to refresh stored admin profile: {e}");
                }
                self.cell.dispatch(SessionAction::Restored(Some(admin)))
            }
            Err(e) => {
                log::warn!("token verification failed: {}", e.message());
                // A 401 has already cleared storage inside the client.
                if !e.is_session_expired() {
                    Credentials::clear(store);
                }
                self.cell.dispatch(SessionAction::Restored(None))
            }
        }
    }

    /// Stop reacting to `401`s and drop all observers.
    pub fn teardown(&self) {
        if let Some(id) = self.expiry_hook.lock().unwrap_or_else(PoisonError::into_inner).take() {
            self.api.remove_expiry_hook(id);
        }
        self.cell.listeners.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Authenticate with email and password.
    pub async fn login(&self, credentials: &LoginRequest) -> AuthOutcome {
        self.cell.dispatch(SessionAction::Begin);
        log::info!("signing in {}", credentials.email);
        let result = self.api.login(credentials).await.map_err(|e| e.message());
        self.finish(result.and_then(|env| accept(env, "Login failed")))
    }

    /// Register a new admin. Callers validate the form first.
    pub async fn signup(&self, profile: &SignupRequest) -> AuthOutcome {
        self.cell.dispatch(SessionAction::Begin);
        log::info!("registering {}", profile.email);
        let result = self.api.signup(profile).await.map_err(|e| e.message());
        self.finish(result.and_then(|env| accept(env, "Signup failed")))
    }

    /// Forget the session locally. No remote call is made.
    pub fn logout(&self) {
        Credentials::clear(self.api.store());
        self.cell.dispatch(SessionAction::LoggedOut);
    }

    /// Drop the last error message.
    pub fn clear_error(&self) {
        self.cell.dispatch(SessionAction::ClearError);
    }

    fn finish(&self, result: Result<Credentials, String>) -> AuthOutcome {
        let credentials = match result {
            Ok(credentials) => credentials,
            Err(error) => return self.fail(error),
        };
        if let Err(e) = credentials.save(self.api.store()) {
            return self.fail(e.to_string());
        }
        self.cell.dispatch(SessionAction::SignedIn(credentials.admin.clone()));
        AuthOutcome::Success(credentials.admin)
    }

    fn fail(&self, error: String) -> AuthOutcome {
        log::warn!("authentication failed: {error}");
        self.cell.dispatch(SessionAction::Failed(error.clone()));
        AuthOutcome::Failure { error }
    }

    fn install_expiry_hook(&self) {
        let mut slot = self.expiry_hook.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return;
        }
        let cell = Arc::clone(&self.cell);
        *slot = Some(self.api.on_session_expired(Arc::new(move || {
            cell.dispatch(SessionAction::Expired);
        })));
    }
}

/// Interpret a login/signup envelope.
fn accept(env: Envelope<AuthPayload>, fallback: &str) -> Result<Credentials, String> {
    if !env.is_success() {
        return Err(env
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_owned()));
    }
    let Some(payload) = env.data else {
        return Err(env.message.unwrap_or_else(|| fallback.to_owned()));
    };
    match (payload.admin, payload.token.filter(|t| !t.is_empty())) {
        (Some(admin), Some(token)) => Ok(Credentials { token, admin }),
        _ => Err(ApiError::Malformed(MISSING_CREDENTIALS_MESSAGE.to_owned()).message()),
    }
}

fn verified_admin(env: Envelope<MePayload>) -> Result<AdminProfile, ApiError> {
    if !env.is_success() {
        return Err(ApiError::Malformed(
            env.message.unwrap_or_else(|| "token verification rejected".to_owned()),
        ));
    }
    env.data
        .and_then(|d| d.admin)
        .ok_or_else(|| ApiError::Malformed("Invalid response: missing admin".to_owned()))
}
