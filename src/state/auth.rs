//! Session lifecycle for the authenticated area of the app.
//!
//! Phases move `Unauthenticated → Authenticating → Authenticated` and end
//! in `Expired` (token rejected by the backend) or `LoggedOut` (user
//! action). The token and user travel together inside one `Session`, so a
//! half-set credential state is unrepresentable; persistence of the pair
//! lives in `util::session_storage`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Session, User};

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Unauthenticated,
    /// A login call is in flight.
    Authenticating,
    Authenticated,
    /// The backend rejected the token; credentials must be re-entered.
    Expired,
    LoggedOut,
}

/// Session state provided via context to every page.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    session: Option<Session>,
}

impl SessionState {
    /// Restore a persisted session at app start.
    #[must_use]
    pub fn restored(session: Session) -> Self {
        Self { phase: SessionPhase::Authenticated, session: Some(session) }
    }

    /// A login call left. Any previous session stays untouched until the
    /// outcome is known.
    pub fn begin_login(&mut self) {
        self.phase = SessionPhase::Authenticating;
    }

    /// Login succeeded: store token and user in one step.
    pub fn complete_login(&mut self, session: Session) {
        self.session = Some(session);
        self.phase = SessionPhase::Authenticated;
    }

    /// Login failed: phase resets, prior session state is left as it was.
    pub fn fail_login(&mut self) {
        self.phase = if self.session.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        };
    }

    /// The backend rejected the token. Clears both halves.
    pub fn expire(&mut self) {
        self.session = None;
        self.phase = SessionPhase::Expired;
    }

    /// User-initiated logout. Clears both halves.
    pub fn logout(&mut self) {
        self.session = None;
        self.phase = SessionPhase::LoggedOut;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated && self.session.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// The logged-in user, or `None` in every other phase.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        if self.is_authenticated() {
            self.session.as_ref().map(|s| &s.user)
        } else {
            None
        }
    }

    /// Role gate for guarded views: authenticated and role in the allowed
    /// set. An empty set means any authenticated user.
    #[must_use]
    pub fn has_role(&self, allowed: &[&str]) -> bool {
        match self.current_user() {
            Some(user) => allowed.is_empty() || allowed.contains(&user.role.as_str()),
            None => false,
        }
    }
}
