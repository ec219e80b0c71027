use super::*;

// =============================================================
// ToastKind durations
// =============================================================

#[test]
fn durations_match_outcome_kind() {
    assert_eq!(ToastKind::Success.auto_dismiss_ms(), Some(4_000));
    assert_eq!(ToastKind::Info.auto_dismiss_ms(), Some(4_000));
    assert_eq!(ToastKind::Warning.auto_dismiss_ms(), Some(5_000));
    assert_eq!(ToastKind::Error.auto_dismiss_ms(), Some(6_000));
}

#[test]
fn loading_never_auto_dismisses() {
    assert_eq!(ToastKind::Loading.auto_dismiss_ms(), None);
}

// =============================================================
// Queue semantics
// =============================================================

#[test]
fn push_preserves_arrival_order() {
    let mut state = ToastState::default();
    state.push(ToastKind::Info, "premier");
    state.push(ToastKind::Error, "deuxième");
    state.push(ToastKind::Success, "troisième");

    let messages: Vec<&str> = state.toasts().iter().map(|t| t.message.as_str()).collect();
    assert_eq!(messages, vec!["premier", "deuxième", "troisième"]);
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "a");
    let b = state.push(ToastKind::Info, "b");
    state.dismiss(a);
    let c = state.push(ToastKind::Info, "c");
    assert!(a < b && b < c);
}

#[test]
fn dismiss_removes_only_the_target() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "a");
    let b = state.push(ToastKind::Warning, "b");
    state.dismiss(a);

    assert_eq!(state.toasts().len(), 1);
    assert_eq!(state.toasts()[0].id, b);
}

#[test]
fn concurrent_toasts_coexist() {
    let mut state = ToastState::default();
    state.push(ToastKind::Error, "échec A");
    state.push(ToastKind::Error, "échec B");
    assert_eq!(state.toasts().len(), 2);
}

// =============================================================
// Promise variant — resolve in place
// =============================================================

#[test]
fn resolve_replaces_loading_in_place() {
    let mut state = ToastState::default();
    state.push(ToastKind::Info, "avant");
    let id = state.push(ToastKind::Loading, "enregistrement…");

    assert!(state.resolve(id, ToastKind::Success, "itinéraire créé"));

    let toast = state.toasts().iter().find(|t| t.id == id).expect("kept");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "itinéraire créé");
    // Position unchanged: still after the earlier toast.
    assert_eq!(state.toasts()[1].id, id);
}

#[test]
fn resolve_after_dismiss_reports_false() {
    let mut state = ToastState::default();
    let id = state.push(ToastKind::Loading, "…");
    state.dismiss(id);
    assert!(!state.resolve(id, ToastKind::Error, "échec"));
}
