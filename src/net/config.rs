//! Backend endpoint configuration.
//!
//! A WASM bundle has no runtime environment, so the API base URL is bound
//! at build time via `IMMAT_API_URL`. The default targets a local backend.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Base URL of the registration backend, without a trailing slash.
#[must_use]
pub fn api_base() -> &'static str {
    option_env!("IMMAT_API_URL").unwrap_or(DEFAULT_API_BASE)
}

/// Join an absolute API path (e.g. `/api/v1/itineraires`) onto the base URL.
#[must_use]
pub fn url(path: &str) -> String {
    let base = api_base().trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
