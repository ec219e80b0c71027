//! Public vehicle-code verification.
//!
//! These endpoints back the public verification page: no session required,
//! but failures still surface through the toast layer. A malformed code is
//! rejected locally (`util::code_unique`) before any network call.

#![allow(clippy::unused_async)]

use leptos::prelude::RwSignal;

use crate::net::types::{VerificationResult, VerifyStats};
use crate::state::auth::SessionState;
use crate::state::query::QueryCache;
use crate::state::toast::ToastState;
#[cfg(feature = "hydrate")]
use crate::state::toast::{ToastKind, push_toast};

use crate::util::code_unique::is_valid_code_unique;

/// Check a unique vehicle code against the registry.
/// Returns `None` on a malformed code or an absorbed failure.
pub async fn verify_code(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
    code: String,
) -> Option<VerificationResult> {
    if !is_valid_code_unique(&code) {
        #[cfg(feature = "hydrate")]
        push_toast(
            toasts,
            ToastKind::Warning,
            "Format de code invalide (attendu : AAA-99-AA999999)",
        );
        return None;
    }

    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_query;

        let path = format!("/api/v1/verify/{code}");
        let fetch_path = path.clone();
        match run_query(cache, path, move || {
            let p = fetch_path.clone();
            async move { http::get_json(&p, None).await }
        })
        .await
        {
            Ok(result) => Some(result),
            Err(err) => {
                crate::net::report_failure(&err, "Vérification du code", toasts, session);
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (cache, toasts, session);
        None
    }
}

/// Aggregate verification counters for the dashboard.
pub async fn fetch_verify_stats(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
) -> Option<VerifyStats> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_query;

        // Legacy endpoint, not under /api/v1.
        let path = "/verify/stats/overview".to_owned();
        match run_query(cache, path, || http::get_json("/verify/stats/overview", None)).await {
            Ok(stats) => Some(stats),
            Err(err) => {
                crate::net::report_failure(&err, "Chargement des statistiques de vérification", toasts, session);
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (cache, toasts, session);
        None
    }
}
