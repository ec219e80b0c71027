//! Typed REST client for the registration backend.
//!
//! DESIGN
//! ======
//! One module per backend resource (`auth`, `itineraires`, `verification`)
//! on top of a shared request wrapper (`http`). Every operation follows a
//! fixed contract:
//!
//! - **Reads** absorb failures: they push an error toast, log the raw
//!   error, and return `Option<T>` so rendering degrades to an empty state.
//! - **Writes** show a pending toast resolved to the outcome and return
//!   `Result<T, ApiError>` so the calling form can keep its state open.
//! - An aborted request (superseded search) is swallowed silently.

pub mod auth;
pub mod config;
pub mod http;
pub mod itineraires;
pub mod types;
pub mod verification;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use leptos::prelude::{RwSignal, Update};

use crate::state::auth::SessionState;
use crate::state::toast::{ToastKind, ToastState};
use http::ApiError;

/// Whether a failure proves the stored credentials are dead.
pub(crate) fn invalidates_session(err: &ApiError) -> bool {
    matches!(err, ApiError::Auth { .. })
}

/// The toast line for a failed action, or `None` when the failure stays
/// silent (request superseded by a newer one).
pub(crate) fn failure_message(err: &ApiError, action: &str) -> Option<String> {
    match err {
        ApiError::Aborted => None,
        other => Some(format!("{action} : {other}")),
    }
}

/// Log the raw failure and apply session policy: an auth rejection tears
/// the session down on both sides, the persisted localStorage pair and the
/// in-memory state, so later requests cannot replay the dead token.
pub(crate) fn note_failure(err: &ApiError, action: &str, session: RwSignal<SessionState>) {
    leptos::logging::warn!("{action}: {err:?}");
    if invalidates_session(err) {
        crate::util::session_storage::clear_session();
        session.update(SessionState::expire);
    }
}

/// Shared failure policy for every resource operation.
///
/// Pushes a French, human-readable toast (raw detail goes to the console
/// log only) on top of `note_failure`'s logging and session teardown.
/// Aborted requests are swallowed entirely.
pub(crate) fn report_failure(
    err: &ApiError,
    action: &str,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
) {
    let Some(message) = failure_message(err, action) else {
        return;
    };
    note_failure(err, action, session);
    crate::state::toast::push_toast(toasts, ToastKind::Error, message);
}
