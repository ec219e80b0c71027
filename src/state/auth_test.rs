use super::*;
use uuid::Uuid;

fn session(role: &str) -> Session {
    Session {
        token: "tok-123".to_owned(),
        user: User {
            id: Uuid::nil(),
            email: "agent@example.cm".to_owned(),
            name: "Agent".to_owned(),
            role: role.to_owned(),
        },
    }
}

// =============================================================
// Phase transitions
// =============================================================

#[test]
fn default_is_unauthenticated_without_user() {
    let state = SessionState::default();
    assert_eq!(state.phase, SessionPhase::Unauthenticated);
    assert!(state.current_user().is_none());
    assert!(state.token().is_none());
}

#[test]
fn login_flow_sets_token_and_user_together() {
    let mut state = SessionState::default();
    state.begin_login();
    assert_eq!(state.phase, SessionPhase::Authenticating);
    assert!(state.current_user().is_none());

    state.complete_login(session("admin"));
    assert!(state.is_authenticated());
    assert_eq!(state.token(), Some("tok-123"));
    assert_eq!(state.current_user().map(|u| u.role.as_str()), Some("admin"));
}

#[test]
fn failed_login_leaves_prior_state_untouched() {
    let mut state = SessionState::default();
    state.begin_login();
    state.fail_login();
    assert_eq!(state.phase, SessionPhase::Unauthenticated);
    assert!(state.token().is_none());

    // Re-login attempt from an already-authenticated session keeps it.
    let mut state = SessionState::restored(session("agent"));
    state.begin_login();
    state.fail_login();
    assert!(state.is_authenticated());
    assert_eq!(state.token(), Some("tok-123"));
}

#[test]
fn logout_clears_both_halves() {
    let mut state = SessionState::restored(session("admin"));
    state.logout();
    assert_eq!(state.phase, SessionPhase::LoggedOut);
    assert!(state.token().is_none());
    assert!(state.current_user().is_none());
}

#[test]
fn expire_clears_both_halves() {
    let mut state = SessionState::restored(session("admin"));
    state.expire();
    assert_eq!(state.phase, SessionPhase::Expired);
    assert!(state.token().is_none());
    assert!(state.current_user().is_none());
}

#[test]
fn restored_session_is_authenticated() {
    let state = SessionState::restored(session("agent"));
    assert!(state.is_authenticated());
}

// =============================================================
// Role guard
// =============================================================

#[test]
fn has_role_requires_authentication() {
    let state = SessionState::default();
    assert!(!state.has_role(&["admin"]));
    assert!(!state.has_role(&[]));
}

#[test]
fn has_role_matches_allowed_set() {
    let state = SessionState::restored(session("agent"));
    assert!(state.has_role(&["admin", "agent"]));
    assert!(!state.has_role(&["admin"]));
}

#[test]
fn empty_allowed_set_admits_any_authenticated_user() {
    let state = SessionState::restored(session("viewer"));
    assert!(state.has_role(&[]));
}
