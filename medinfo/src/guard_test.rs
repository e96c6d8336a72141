use super::*;
use crate::session::SessionAction;
use crate::test_support::admin;

#[test]
fn loading_session_waits() {
    assert_eq!(decide(&Session::default(), "/dashboard"), GuardDecision::Wait);
}

#[test]
fn pending_login_after_startup_does_not_wait() {
    let session = Session::default()
        .apply(SessionAction::Restored(None))
        .apply(SessionAction::Begin);
    assert!(matches!(decide(&session, "/create"), GuardDecision::Redirect { .. }));
}

#[test]
fn authenticated_session_renders() {
    let session = Session::default().apply(SessionAction::Restored(Some(admin("a1", "Ada"))));
    assert_eq!(decide(&session, "/create"), GuardDecision::Render);
}

#[test]
fn anonymous_session_redirects_with_return_path() {
    let session = Session::default().apply(SessionAction::Restored(None));
    assert_eq!(
        decide(&session, "/create"),
        GuardDecision::Redirect { to: "/login?redirect=/create".to_owned() }
    );
}

#[test]
fn redirect_encodes_query_characters() {
    assert_eq!(login_redirect("/dashboard?page=2"), "/login?redirect=/dashboard%3Fpage%3D2");
}

#[test]
fn unsafe_origin_path_redirects_without_target() {
    assert_eq!(login_redirect("//evil.example"), "/login");
}

#[test]
fn return_target_defaults_to_dashboard() {
    assert_eq!(safe_return_target(None), "/dashboard");
    assert_eq!(safe_return_target(Some("")), "/dashboard");
    assert_eq!(safe_return_target(Some("  ")), "/dashboard");
}

#[test]
fn return_target_keeps_relative_paths() {
    assert_eq!(safe_return_target(Some("/create")), "/create");
    assert_eq!(safe_return_target(Some("/view/abc-123")), "/view/abc-123");
}

#[test]
fn return_target_rejects_foreign_origins() {
    for target in ["https://evil.example/", "//evil.example", "/\\evil.example", "javascript:alert(1)", "dashboard"] {
        assert_eq!(safe_return_target(Some(target)), "/dashboard", "{target}");
    }
}

#[test]
fn return_target_never_loops_back_to_login() {
    assert_eq!(safe_return_target(Some("/login")), "/dashboard");
    assert_eq!(safe_return_target(Some("/login?redirect=/create")), "/dashboard");
}
