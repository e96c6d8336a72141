use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;
use crate::store::{ADMIN_KEY, Credentials, TOKEN_KEY};
use crate::test_support::{CountingStore, ScriptedTransport, admin};

fn client(transport: &Arc<ScriptedTransport>, store: &CountingStore) -> ApiClient<Arc<ScriptedTransport>, CountingStore> {
    ApiClient::new(Arc::clone(transport), store.clone(), ApiConfig::new("http://api.test/api"))
}

fn persist_session(store: &CountingStore) {
    Credentials { token: "tok-1".to_owned(), admin: admin("a1", "Ada") }
        .save(store)
        .unwrap();
}

#[tokio::test]
async fn attaches_bearer_token_when_persisted() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    persist_session(&store);
    transport.respond(200, json!({ "success": true, "data": { "languages": [] } }));

    client(&transport, &store).languages().await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].header("authorization"), Some("Bearer tok-1"));
    assert_eq!(sent[0].url, "http://api.test/api/translate/languages");
    assert_eq!(sent[0].method, Method::Get);
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "status": "ok" }));

    client(&transport, &store).health().await.unwrap();

    assert_eq!(transport.requests()[0].header("Authorization"), None);
    assert_eq!(transport.requests()[0].header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn list_records_sends_paging_query_and_unwraps_data() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(
        200,
        json!({
            "success": true,
            "data": {
                "infoRecords": [{ "_id": "r1", "medicineName": "Aspirin", "viewCount": 3 }],
                "pagination": { "current": 2, "pages": 4, "total": 31 }
            }
        }),
    );

    let page = client(&transport, &store).list_records(2, 10).await.unwrap();

    assert_eq!(transport.requests()[0].url, "http://api.test/api/info?page=2&limit=10");
    assert_eq!(page.info_records.len(), 1);
    assert_eq!(page.info_records[0].medicine_name, "Aspirin");
    assert_eq!(page.pagination.total, 31);
}

#[tokio::test]
async fn non_2xx_uses_server_message_and_errors() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(
        400,
        json!({ "success": false, "message": "Validation failed", "errors": [{ "field": "price" }] }),
    );

    let err = client(&transport, &store)
        .create_record(&NewInfoRecord::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "Validation failed");
    assert_eq!(err.errors(), Some(&json!([{ "field": "price" }])));
}

#[tokio::test]
async fn non_2xx_without_message_reports_status_code() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond_raw(502, "<html>Bad gateway</html>");

    let err = client(&transport, &store).delete_record("r1").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Remote { status: 502, message: "Request failed with status code 502".to_owned(), errors: None }
    );
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.fail("connection refused");

    let err = client(&transport, &store).languages().await.unwrap_err();

    assert_eq!(err, ApiError::Network("connection refused".to_owned()));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn success_with_invalid_json_is_malformed() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond_raw(200, "not json");

    let err = client(&transport, &store).languages().await.unwrap_err();

    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn success_without_data_is_malformed() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": true }));

    let err = client(&transport, &store).record_by_unique_id("abc").await.unwrap_err();

    assert_eq!(err, ApiError::Malformed("response is missing `data`".to_owned()));
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    persist_session(&store);
    transport.respond_raw(204, "");

    client(&transport, &store).delete_record("r1").await.unwrap();

    assert_eq!(transport.requests()[0].method, Method::Delete);
    assert_eq!(transport.requests()[0].url, "http://api.test/api/info/r1");
}

#[tokio::test]
async fn empty_success_body_is_still_missing_data() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond_raw(200, "");

    let err = client(&transport, &store).record_by_unique_id("abc").await.unwrap_err();

    assert_eq!(err, ApiError::Malformed("response is missing `data`".to_owned()));
}

#[tokio::test]
async fn unauthorized_clears_credentials_once_and_fires_hooks() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    persist_session(&store);
    transport.respond(401, json!({ "success": false, "message": "Token expired" }));

    let api = client(&transport, &store);
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_hook = Arc::clone(&fired);
    api.on_session_expired(Arc::new(move || {
        fired_hook.fetch_add(1, Ordering::SeqCst);
    }));

    let err = api.toggle_record("r1").await.unwrap_err();

    assert_eq!(err, ApiError::SessionExpired { message: "Token expired".to_owned() });
    assert_eq!(store.token_removals(), 1);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(ADMIN_KEY), None);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn removed_hook_is_not_fired() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(401, json!({}));

    let api = client(&transport, &store);
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_hook = Arc::clone(&fired);
    let id = api.on_session_expired(Arc::new(move || {
        fired_hook.fetch_add(1, Ordering::SeqCst);
    }));
    api.remove_expiry_hook(id);

    let err = api.languages().await.unwrap_err();

    assert!(err.is_session_expired());
    assert_eq!(err.message(), "Request failed with status code 401");
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn toggle_accepts_wrapped_or_bare_record() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": true, "data": { "infoRecord": { "_id": "r1", "isActive": false } } }));
    transport.respond(200, json!({ "success": true, "data": { "_id": "r1", "isActive": true } }));

    let api = client(&transport, &store);
    assert!(!api.toggle_record("r1").await.unwrap().is_active);
    assert!(api.toggle_record("r1").await.unwrap().is_active);
    assert_eq!(transport.requests()[0].url, "http://api.test/api/info/r1/toggle");
    assert_eq!(transport.requests()[0].method, Method::Patch);
}

#[tokio::test]
async fn success_false_on_2xx_is_remote_error() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": false, "message": "Record not found" }));

    let err = client(&transport, &store).delete_record("gone").await.unwrap_err();

    assert_eq!(err.message(), "Record not found");
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn translate_batch_posts_texts_and_target() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": true, "data": { "translatedTexts": ["uno", "dos"] } }));

    let texts = vec!["one".to_owned(), "two".to_owned()];
    let out = client(&transport, &store).translate_batch(&texts, "es").await.unwrap();

    assert_eq!(out, vec!["uno".to_owned(), "dos".to_owned()]);
    let body: serde_json::Value = serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "texts": ["one", "two"], "targetLang": "es" }));
}

#[tokio::test]
async fn unique_id_is_percent_encoded() {
    let transport = ScriptedTransport::new();
    let store = CountingStore::new();
    transport.respond(200, json!({ "success": true, "data": { "infoRecord": { "_id": "r1" } } }));

    client(&transport, &store).record_by_unique_id("a b/c").await.unwrap();

    assert_eq!(transport.requests()[0].url, "http://api.test/api/info/view/a%20b%2Fc");
}

#[test]
fn encode_segment_keeps_unreserved_characters() {
    assert_eq!(encode_segment("AZaz09-_.~"), "AZaz09-_.~");
    assert_eq!(encode_segment("é"), "%C3%A9");
}
