use super::*;

fn record(json: serde_json::Value) -> InfoRecord {
    serde_json::from_value(json).unwrap()
}

#[test]
fn view_link_prefers_service_url() {
    let rec = record(serde_json::json!({
        "_id": "r1",
        "uniqueId": "u-1",
        "qrCodeUrl": "https://medqr.example/view/u-1"
    }));
    assert_eq!(public_view_href(&rec), "https://medqr.example/view/u-1");
}

#[test]
fn view_link_falls_back_to_local_route() {
    let rec = record(serde_json::json!({ "_id": "r1", "uniqueId": "u-1" }));
    assert_eq!(public_view_href(&rec), "/view/u-1");
}

#[test]
fn expired_session_is_not_reported_inline() {
    let expired = ApiError::SessionExpired { message: "jwt expired".to_owned() };
    assert_eq!(failure_message(&expired), None);

    let remote = ApiError::Remote { status: 500, message: "Database down".to_owned(), errors: None };
    assert_eq!(failure_message(&remote).as_deref(), Some("Database down"));
}

#[test]
fn blank_usage_has_placeholder() {
    let rec = record(serde_json::json!({ "_id": "r1", "usage": "  " }));
    assert_eq!(usage_preview(&rec), "No usage information provided");
}
