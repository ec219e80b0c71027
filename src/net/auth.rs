//! Authentication operations: login and the token-validation probe.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::RwSignal;

use crate::net::http::ApiError;
use crate::net::types::Session;
use crate::state::toast::ToastState;
#[cfg(feature = "hydrate")]
use crate::state::toast::{ToastKind, push_toast};

/// Three-way outcome of the token probe.
///
/// The backend cannot be asked "is this token valid" directly, so the probe
/// hits a cheap authenticated endpoint. An unreachable backend is reported
/// separately from a rejected token: only the latter justifies destroying
/// the persisted session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    /// The backend answered 401/403: the session must be destroyed.
    Invalid,
    /// No usable answer (offline, 5xx): keep the session and retry later.
    Unreachable,
}

impl TokenStatus {
    /// Classify a probe outcome. Any response that is not an auth rejection
    /// proves the token was accepted; transport and server failures prove
    /// nothing either way.
    #[must_use]
    pub fn from_probe<T>(outcome: &Result<T, ApiError>) -> Self {
        match outcome {
            Ok(_) => TokenStatus::Valid,
            Err(ApiError::Auth { .. }) => TokenStatus::Invalid,
            Err(ApiError::Network | ApiError::Server { .. } | ApiError::Aborted) => {
                TokenStatus::Unreachable
            }
            Err(_) => TokenStatus::Valid,
        }
    }
}

/// Call the login endpoint. On success the caller receives the full
/// session (token + user) to store atomically; on failure an error toast
/// is pushed and the error propagates so the form stays open.
pub async fn login(
    toasts: RwSignal<ToastState>,
    email: String,
    password: String,
) -> Result<Session, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::net::types::{LoginRequest, LoginResponse};

        let request = LoginRequest { email, password };
        match http::post_json::<LoginResponse, _>("/api/v1/users/login", &request).await {
            Ok(resp) => {
                push_toast(toasts, ToastKind::Success, "Connexion réussie");
                Ok(Session { token: resp.token, user: resp.user })
            }
            Err(err) => {
                leptos::logging::warn!("login failed: {err:?}");
                // A 401 here means bad credentials, not an expired session.
                let message = match &err {
                    ApiError::Auth { .. } => "E-mail ou mot de passe incorrect".to_owned(),
                    other => format!("Échec de la connexion : {other}"),
                };
                push_toast(toasts, ToastKind::Error, message);
                Err(err)
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (toasts, email, password);
        Err(ApiError::Network)
    }
}

/// Probe the backend with the stored token (a cheap authenticated list
/// endpoint). No toast: callers decide what an invalid session means.
pub async fn validate_token() -> TokenStatus {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;

        let outcome = http::get_json::<serde_json::Value>("/api/v1/vehicules", None).await;
        TokenStatus::from_probe(&outcome)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        TokenStatus::Unreachable
    }
}
