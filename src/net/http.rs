//! HTTP request wrapper for the registration backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the bearer
//! token attached when a session is stored. The request functions are only
//! compiled for the browser; resource modules provide SSR stubs the same
//! way the pages never fetch on the server.
//!
//! ERROR HANDLING
//! ==============
//! Expected failures never escape this boundary as panics or JS exceptions:
//! every outcome is a `Result<T, ApiError>`, so callers can never observe
//! data and an error at the same time. `Display` on `ApiError` is the
//! French, user-facing message; the raw detail only goes to the console log.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde_json::Value;

/// Failure taxonomy for backend calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, refused).
    #[error("impossible de joindre le serveur")]
    Network,
    /// 401/403 — the token is missing, expired, or lacks permission.
    #[error("session expirée ou accès refusé")]
    Auth { status: u16 },
    /// Other 4xx — the submitted data was rejected, possibly per field.
    #[error("{message}")]
    Validation { message: String, fields: Vec<String> },
    /// 404 — the resource does not exist (or was deleted concurrently).
    #[error("ressource introuvable")]
    NotFound,
    /// 5xx — the backend failed; retryable.
    #[error("erreur interne du serveur")]
    Server { status: u16 },
    /// The request was cancelled by a newer one. Never user-facing.
    #[error("requête annulée")]
    Aborted,
}

impl ApiError {
    /// Whether a retry can plausibly succeed without user action.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network | ApiError::Server { .. })
    }
}

/// Extract the server's human-readable error message from a response body.
/// The backend uses `message` in newer endpoints and `error` in older ones;
/// `message` wins when both are present.
#[must_use]
pub fn error_message(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
}

/// Field names from a validation error body. The backend sends either an
/// `errors` object keyed by field, or a plain array of field names.
#[must_use]
pub fn validation_fields(body: &Value) -> Vec<String> {
    match body.get("errors") {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

/// Map a non-2xx status and its body onto the error taxonomy.
#[must_use]
pub fn classify(status: u16, body: &Value) -> ApiError {
    match status {
        401 | 403 => ApiError::Auth { status },
        404 => ApiError::NotFound,
        400..=499 => ApiError::Validation {
            message: error_message(body).unwrap_or("données invalides").to_owned(),
            fields: validation_fields(body),
        },
        _ => ApiError::Server { status },
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{delete, get_json, post_json, put_json};

#[cfg(feature = "hydrate")]
mod browser {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::Serialize;
    use serde_json::Value;
    use web_sys::AbortSignal;

    use super::ApiError;
    use crate::net::config;
    use crate::util::session_storage;

    /// Attach the bearer token when a session is stored.
    fn authorized(builder: RequestBuilder) -> RequestBuilder {
        match session_storage::load_session() {
            Some(session) => builder.header("Authorization", &format!("Bearer {}", session.token)),
            None => builder,
        }
    }

    fn map_send_error(err: &gloo_net::Error) -> ApiError {
        match err {
            gloo_net::Error::JsError(js) if js.name == "AbortError" => ApiError::Aborted,
            _ => ApiError::Network,
        }
    }

    async fn read_response<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if resp.ok() {
            // A 2xx body that fails to decode means the backend broke its
            // contract; surface it as a server error, not a network one.
            resp.json::<T>().await.map_err(|_| ApiError::Server { status })
        } else {
            let body = resp.json::<Value>().await.unwrap_or(Value::Null);
            Err(super::classify(status, &body))
        }
    }

    /// `GET` a JSON resource, optionally tied to an abort signal so a newer
    /// request can supersede this one.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        path: &str,
        signal: Option<&AbortSignal>,
    ) -> Result<T, ApiError> {
        let resp = authorized(Request::get(&config::url(path)))
            .abort_signal(signal)
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;
        read_response(resp).await
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post_json<T: serde::de::DeserializeOwned, B: Serialize>(
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = authorized(Request::post(&config::url(path)))
            .json(body)
            .map_err(|_| ApiError::Network)?;
        let resp = req.send().await.map_err(|e| map_send_error(&e))?;
        read_response(resp).await
    }

    /// `PUT` a JSON body and decode the JSON response.
    pub async fn put_json<T: serde::de::DeserializeOwned, B: Serialize>(
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = authorized(Request::put(&config::url(path)))
            .json(body)
            .map_err(|_| ApiError::Network)?;
        let resp = req.send().await.map_err(|e| map_send_error(&e))?;
        read_response(resp).await
    }

    /// `DELETE` a resource, ignoring any response body.
    pub async fn delete(path: &str) -> Result<(), ApiError> {
        let resp = authorized(Request::delete(&config::url(path)))
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;
        if resp.ok() {
            Ok(())
        } else {
            let body = resp.json::<Value>().await.unwrap_or(Value::Null);
            Err(super::classify(resp.status(), &body))
        }
    }
}
