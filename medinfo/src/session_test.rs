use super::*;
use crate::test_support::admin;

// =============================================================
// Startup
// =============================================================

#[test]
fn default_session_is_loading() {
    let session = Session::default();
    assert_eq!(session.phase, SessionPhase::Loading);
    assert!(session.is_loading());
    assert!(!session.is_resolved());
    assert!(!session.is_authenticated());
}

#[test]
fn restored_with_admin_authenticates() {
    let next = Session::default().apply(SessionAction::Restored(Some(admin("a1", "Ada"))));
    assert!(next.is_authenticated());
    assert_eq!(next.admin().map(|a| a.name.as_str()), Some("Ada"));
    assert!(!next.is_loading());
}

#[test]
fn restored_without_admin_is_anonymous() {
    let next = Session::default().apply(SessionAction::Restored(None));
    assert_eq!(next.phase, SessionPhase::Anonymous);
    assert!(next.is_resolved());
}

// =============================================================
// Login / signup
// =============================================================

#[test]
fn begin_sets_pending_and_clears_error() {
    let session = Session { phase: SessionPhase::Anonymous, pending: false, error: Some("old".to_owned()) };
    let next = session.apply(SessionAction::Begin);
    assert!(next.pending);
    assert!(next.is_loading());
    assert_eq!(next.error, None);
    assert_eq!(next.phase, SessionPhase::Anonymous);
}

#[test]
fn signed_in_authenticates_and_settles() {
    let next = Session::default()
        .apply(SessionAction::Restored(None))
        .apply(SessionAction::Begin)
        .apply(SessionAction::SignedIn(admin("a1", "Ada")));
    assert!(next.is_authenticated());
    assert!(!next.pending);
}

#[test]
fn failed_keeps_anonymous_with_error() {
    let next = Session::default()
        .apply(SessionAction::Restored(None))
        .apply(SessionAction::Begin)
        .apply(SessionAction::Failed("Invalid credentials".to_owned()));
    assert_eq!(next.phase, SessionPhase::Anonymous);
    assert_eq!(next.error.as_deref(), Some("Invalid credentials"));
    assert!(!next.pending);
}

#[test]
fn failure_during_loading_settles_to_anonymous() {
    let next = Session::default().apply(SessionAction::Failed("boom".to_owned()));
    assert_eq!(next.phase, SessionPhase::Anonymous);
}

// =============================================================
// Logout / expiry / clear error
// =============================================================

#[test]
fn logout_and_expiry_reset_to_anonymous() {
    let authed = Session::default().apply(SessionAction::SignedIn(admin("a1", "Ada")));
    for action in [SessionAction::LoggedOut, SessionAction::Expired] {
        let next = authed.apply(action);
        assert_eq!(next, Session { phase: SessionPhase::Anonymous, pending: false, error: None });
    }
}

#[test]
fn clear_error_keeps_phase() {
    let session = Session { phase: SessionPhase::Anonymous, pending: false, error: Some("x".to_owned()) };
    let next = session.apply(SessionAction::ClearError);
    assert_eq!(next.error, None);
    assert_eq!(next.phase, SessionPhase::Anonymous);
}

#[test]
fn clear_error_without_error_is_noop() {
    let states = [
        Session::default(),
        Session::default().apply(SessionAction::Restored(None)),
        Session::default().apply(SessionAction::SignedIn(admin("a1", "Ada"))),
    ];
    for state in states {
        assert_eq!(state.apply(SessionAction::ClearError), state);
    }
}

#[test]
fn authenticated_flag_tracks_admin_presence_across_transitions() {
    let actions = [
        SessionAction::Restored(None),
        SessionAction::Begin,
        SessionAction::Failed("nope".to_owned()),
        SessionAction::Begin,
        SessionAction::SignedIn(admin("a1", "Ada")),
        SessionAction::ClearError,
        SessionAction::Expired,
        SessionAction::SignedIn(admin("a2", "Bo")),
        SessionAction::LoggedOut,
    ];
    let mut session = Session::default();
    for action in actions {
        session = session.apply(action);
        assert_eq!(session.is_authenticated(), session.admin().is_some());
    }
}

#[test]
fn restored_after_sign_in_is_ignored() {
    let authed = Session::default().apply(SessionAction::SignedIn(admin("a1", "Ada")));
    assert_eq!(authed.apply(SessionAction::Restored(None)), authed);

    let anonymous = Session::default().apply(SessionAction::LoggedOut);
    assert_eq!(anonymous.apply(SessionAction::Restored(Some(admin("a2", "Bo")))), anonymous);
}

#[test]
fn restored_keeps_an_in_flight_login_pending() {
    let next = Session::default().apply(SessionAction::Begin).apply(SessionAction::Restored(None));
    assert_eq!(next.phase, SessionPhase::Anonymous);
    assert!(next.pending);
}
