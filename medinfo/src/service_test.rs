use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;
use crate::config::ApiConfig;
use crate::session::SessionPhase;
use crate::store::{ADMIN_KEY, CredentialStore, TOKEN_KEY};
use crate::test_support::{CountingStore, ScriptedTransport, admin, admin_json};

type TestService = SessionService<Arc<ScriptedTransport>, CountingStore>;

fn service(transport: &Arc<ScriptedTransport>, store: &CountingStore) -> TestService {
    SessionService::new(ApiClient::new(
        Arc::clone(transport),
        store.clone(),
        ApiConfig::new("http://api.test/api"),
    ))
}

fn login_request() -> LoginRequest {
    LoginRequest { email: "a@b.com".to_owned(), password: "x".to_owned() }
}

fn persist(store: &CountingStore, token: &str, profile: &AdminProfile) {
    Credentials { token: token.to_owned(), admin: profile.clone() }
        .save(store)
        .unwrap();
}

// =============================================================
// Startup revalidation
// =============================================================

#[tokio::test]
async fn init_without_persisted_pair_is_anonymous_without_network() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();

    let session = service(&transport, &store).init().await;

    assert_eq!(session.phase, SessionPhase::Anonymous);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn init_discards_half_pair_without_network() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    store.set(TOKEN_KEY, "orphan").unwrap();

    let session = service(&transport, &store).init().await;

    assert_eq!(session.phase, SessionPhase::Anonymous);
    assert_eq!(transport.request_count(), 0);
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn init_with_valid_token_authenticates_with_server_profile() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    persist(&store, "tok", &admin("a1", "Ada"));
    let fresh = AdminProfile { name: "Ada L.".to_owned(), ..admin("a1", "Ada") };
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&fresh) } }));

    let session = service(&transport, &store).init().await;

    assert_eq!(session.admin(), Some(&fresh));
    assert_eq!(transport.requests()[0].header("Authorization"), Some("Bearer tok"));
    assert_eq!(Credentials::load(&store), Some(Credentials { token: "tok".to_owned(), admin: fresh }));
}

#[tokio::test]
async fn init_with_rejected_token_clears_storage_once() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    persist(&store, "stale", &admin("a1", "Ada"));
    transport.respond(401, json!({ "success": false, "message": "Token expired" }));

    let session = service(&transport, &store).init().await;

    assert_eq!(session.phase, SessionPhase::Anonymous);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(ADMIN_KEY), None);
    assert_eq!(store.token_removals(), 1);
}

#[tokio::test]
async fn init_with_unreachable_server_clears_storage() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    persist(&store, "tok", &admin("a1", "Ada"));
    transport.fail("offline");

    let session = service(&transport, &store).init().await;

    assert_eq!(session.phase, SessionPhase::Anonymous);
    assert!(store.inner().entries().is_empty());
}

#[tokio::test]
async fn init_with_profile_less_response_clears_storage() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    persist(&store, "tok", &admin("a1", "Ada"));
    transport.respond(200, json!({ "success": true, "data": {} }));

    let session = service(&transport, &store).init().await;

    assert_eq!(session.phase, SessionPhase::Anonymous);
    assert_eq!(store.get(TOKEN_KEY), None);
}

// =============================================================
// Login
// =============================================================

#[tokio::test]
async fn login_success_authenticates_and_persists_both_keys() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let ada = admin("a1", "Ada");
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada), "token": "jwt-1" } }));

    let svc = service(&transport, &store);
    svc.init().await;
    let outcome = svc.login(&login_request()).await;

    assert_eq!(outcome, AuthOutcome::Success(ada.clone()));
    assert_eq!(svc.session().phase, SessionPhase::Authenticated(ada.clone()));
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("jwt-1"));
    assert_eq!(store.get(ADMIN_KEY).map(|raw| serde_json::from_str::<AdminProfile>(&raw).unwrap()), Some(ada));

    let sent = &transport.requests()[0];
    assert_eq!(sent.url, "http://api.test/api/auth/login");
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "a@b.com", "password": "x" }));
}

#[tokio::test]
async fn login_rejected_by_envelope_records_server_message_without_writes() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": false, "message": "Invalid email or password" }));

    let svc = service(&transport, &store);
    svc.init().await;
    let outcome = svc.login(&login_request()).await;

    assert_eq!(outcome.error(), Some("Invalid email or password"));
    let session = svc.session();
    assert_eq!(session.phase, SessionPhase::Anonymous);
    assert_eq!(session.error.as_deref(), Some("Invalid email or password"));
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn login_remote_error_uses_response_message() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(400, json!({ "success": false, "message": "Email is not registered" }));

    let svc = service(&transport, &store);
    let outcome = svc.login(&login_request()).await;

    assert_eq!(outcome.error(), Some("Email is not registered"));
    assert!(!svc.session().is_authenticated());
}

#[tokio::test]
async fn login_without_token_is_malformed() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&admin("a1", "Ada")) } }));

    let svc = service(&transport, &store);
    let outcome = svc.login(&login_request()).await;

    assert_eq!(outcome.error(), Some(MISSING_CREDENTIALS_MESSAGE));
    assert!(!svc.session().is_authenticated());
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn login_network_failure_is_reported_not_raised() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.fail("connection reset");

    let svc = service(&transport, &store);
    let outcome = svc.login(&login_request()).await;

    assert_eq!(outcome, AuthOutcome::Failure { error: "connection reset".to_owned() });
    assert!(!svc.session().pending);
}

// =============================================================
// Signup + reload round trip
// =============================================================

#[tokio::test]
async fn signup_then_reload_yields_same_profile() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let ada = admin("a1", "Ada");
    transport.respond(201, json!({ "success": true, "data": { "admin": admin_json(&ada), "token": "jwt-s" } }));
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada) } }));

    let first = service(&transport, &store);
    first.init().await;
    let request = SignupRequest { name: "Ada".to_owned(), email: ada.email.clone(), password: "secret1".to_owned() };
    assert!(first.signup(&request).await.is_success());
    first.teardown();

    let reloaded = service(&transport, &store);
    let session = reloaded.init().await;

    assert_eq!(session.admin(), Some(&ada));
    assert_eq!(transport.requests()[1].header("Authorization"), Some("Bearer jwt-s"));
}

#[tokio::test]
async fn signup_failure_falls_back_to_default_message() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": false }));

    let svc = service(&transport, &store);
    let request = SignupRequest { name: "Bo".to_owned(), email: "bo@x.io".to_owned(), password: "secret".to_owned() };

    assert_eq!(svc.signup(&request).await.error(), Some("Signup failed"));
}

// =============================================================
// Logout / clear error / expiry
// =============================================================

#[tokio::test]
async fn logout_clears_storage_without_network() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let ada = admin("a1", "Ada");
    persist(&store, "tok", &ada);
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada) } }));

    let svc = service(&transport, &store);
    svc.init().await;
    let calls_before = transport.request_count();
    svc.logout();

    assert_eq!(transport.request_count(), calls_before);
    assert_eq!(svc.session().phase, SessionPhase::Anonymous);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(ADMIN_KEY), None);
}

#[tokio::test]
async fn clear_error_without_error_does_not_notify() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let svc = service(&transport, &store);
    svc.init().await;

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    svc.subscribe(Arc::new(move |_: &Session| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let before = svc.session();
    svc.clear_error();

    assert_eq!(svc.session(), before);
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unauthorized_record_call_expires_session() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let ada = admin("a1", "Ada");
    persist(&store, "tok", &ada);
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada) } }));
    transport.respond(401, json!({ "message": "jwt expired" }));

    let svc = service(&transport, &store);
    svc.init().await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    svc.subscribe(Arc::new(move |s: &Session| sink.lock().unwrap().push(s.phase.clone())));

    let err = svc.api().list_records(1, 10).await.unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(svc.session().phase, SessionPhase::Anonymous);
    assert_eq!(store.token_removals(), 1);
    assert_eq!(*seen.lock().unwrap(), vec![SessionPhase::Anonymous]);
}

#[tokio::test]
async fn teardown_stops_expiry_and_observers() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let ada = admin("a1", "Ada");
    persist(&store, "tok", &ada);
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada) } }));
    transport.respond(401, json!({}));

    let svc = service(&transport, &store);
    svc.init().await;
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    svc.subscribe(Arc::new(move |_: &Session| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    svc.teardown();

    let _ = svc.api().languages().await;

    assert!(svc.session().is_authenticated());
    assert_eq!(notified.load(Ordering::SeqCst), 0);
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn repeated_init_installs_single_expiry_hook() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let ada = admin("a1", "Ada");
    persist(&store, "tok", &ada);
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada) } }));
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada) } }));
    transport.respond(401, json!({}));

    let svc = service(&transport, &store);
    svc.init().await;
    svc.init().await;
    svc.teardown();

    let _ = svc.api().languages().await;

    assert!(svc.session().is_authenticated());
}

#[tokio::test]
async fn late_revalidation_keeps_a_finished_login() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    let ada = admin("a1", "Ada");
    transport.respond(200, json!({ "success": true, "data": { "admin": admin_json(&ada), "token": "jwt-1" } }));
    transport.fail("Network Error");

    let svc = service(&transport, &store);
    svc.login(&login_request()).await;
    let session = svc.init().await;

    assert_eq!(session.phase, SessionPhase::Authenticated(ada.clone()));
    assert_eq!(svc.session().phase, SessionPhase::Authenticated(ada));
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("jwt-1"));
    assert_eq!(store.token_removals(), 0);
}
