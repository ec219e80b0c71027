//! CRUD operations for registered routes (itinéraires).
//!
//! Reads go through the query cache (`state::query::run_query`) so repeated
//! navigation does not refetch fresh data; writes go through
//! `run_mutation`, which invalidates the whole itinerary family on success.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "itineraires_test.rs"]
mod itineraires_test;

use leptos::prelude::RwSignal;

use crate::net::http::ApiError;
use crate::net::types::{Itineraire, ItineraireInput, ItineraireStats};
use crate::state::auth::SessionState;
use crate::state::query::QueryCache;
use crate::state::toast::ToastState;
#[cfg(feature = "hydrate")]
use crate::state::toast::toast_promise;

/// Endpoint prefix shared by every itinerary query key.
pub const FAMILY: &str = "/api/v1/itineraires";

/// Search endpoint with the user's term percent-encoded, so `&`, `#` and
/// friends cannot corrupt the query string.
#[cfg(any(test, feature = "hydrate"))]
fn search_path(term: &str) -> String {
    format!("{FAMILY}?search={}", urlencoding::encode(term))
}

/// List all routes. Failure degrades to `None` after a toast.
pub async fn fetch_itineraires(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
) -> Option<Vec<Itineraire>> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_query;

        let key = QueryCache::query_key(FAMILY, &[]);
        match run_query(cache, key, || http::get_json(FAMILY, None)).await {
            Ok(list) => Some(list),
            Err(err) => {
                crate::net::report_failure(&err, "Chargement des itinéraires", toasts, session);
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

/// Read one route by id.
pub async fn fetch_itineraire(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
    id: String,
) -> Option<Itineraire> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_query;

        let path = format!("{FAMILY}/{id}");
        let fetch_path = path.clone();
        match run_query(cache, path, move || {
            let p = fetch_path.clone();
            async move { http::get_json(&p, None).await }
        })
        .await
        {
            Ok(item) => Some(item),
            Err(err) => {
                crate::net::report_failure(&err, "Chargement de l'itinéraire", toasts, session);
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (cache, toasts, session, id);
        None
    }
}

/// Publicly visible active routes (no authentication).
pub async fn fetch_public_active(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
) -> Option<Vec<Itineraire>> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_query;

        let path = format!("{FAMILY}/public/active");
        let fetch_path = path.clone();
        match run_query(cache, path, move || {
            let p = fetch_path.clone();
            async move { http::get_json(&p, None).await }
        })
        .await
        {
            Ok(list) => Some(list),
            Err(err) => {
                crate::net::report_failure(&err, "Chargement des itinéraires actifs", toasts, session);
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

/// Dashboard counters.
pub async fn fetch_stats(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
) -> Option<ItineraireStats> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_query;

        let path = format!("{FAMILY}/stats");
        let fetch_path = path.clone();
        match run_query(cache, path, move || {
            let p = fetch_path.clone();
            async move { http::get_json(&p, None).await }
        })
        .await
        {
            Ok(stats) => Some(stats),
            Err(err) => {
                crate::net::report_failure(&err, "Chargement des statistiques", toasts, session);
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

/// Live search, bypassing the cache. Only compiled for the browser: the
/// debounced search flow owns the abort signal of the previous request.
#[cfg(feature = "hydrate")]
pub async fn search_itineraires(
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
    search: String,
    signal: Option<web_sys::AbortSignal>,
) -> Option<Vec<Itineraire>> {
    use crate::net::http;

    let path = search_path(&search);
    match http::get_json(&path, signal.as_ref()).await {
        Ok(list) => Some(list),
        Err(err) => {
            // A superseded search is not a failure.
            crate::net::report_failure(&err, "Recherche des itinéraires", toasts, session);
            None
        }
    }
}

/// Create a route. A pending toast resolves to the outcome, and the error
/// propagates so the form can stay open with its data intact.
pub async fn create_itineraire(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
    input: ItineraireInput,
) -> Result<Itineraire, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_mutation;

        let outcome = toast_promise(
            toasts,
            run_mutation(cache, FAMILY, move || {
                let body = input.clone();
                async move { http::post_json(FAMILY, &body).await }
            }),
            "Enregistrement de l'itinéraire…",
            "Itinéraire créé avec succès",
        )
        .await;
        if let Err(err) = &outcome {
            crate::net::note_failure(err, "Création de l'itinéraire", session);
        }
        outcome
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (cache, toasts, session, input);
        Err(ApiError::Network)
    }
}

/// Update a route by id. Same propagation contract as `create_itineraire`.
pub async fn update_itineraire(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
    id: String,
    input: ItineraireInput,
) -> Result<Itineraire, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_mutation;

        let path = format!("{FAMILY}/{id}");
        let outcome = toast_promise(
            toasts,
            run_mutation(cache, FAMILY, move || {
                let p = path.clone();
                let body = input.clone();
                async move { http::put_json(&p, &body).await }
            }),
            "Mise à jour de l'itinéraire…",
            "Itinéraire mis à jour",
        )
        .await;
        if let Err(err) = &outcome {
            crate::net::note_failure(err, "Mise à jour de l'itinéraire", session);
        }
        outcome
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (cache, toasts, session, id, input);
        Err(ApiError::Network)
    }
}

/// Delete a route by id. Same propagation contract as `create_itineraire`.
pub async fn delete_itineraire(
    cache: RwSignal<QueryCache>,
    toasts: RwSignal<ToastState>,
    session: RwSignal<SessionState>,
    id: String,
) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::http;
        use crate::state::query::run_mutation;

        let path = format!("{FAMILY}/{id}");
        let outcome = toast_promise(
            toasts,
            run_mutation(cache, FAMILY, move || {
                let p = path.clone();
                async move { http::delete(&p).await }
            }),
            "Suppression de l'itinéraire…",
            "Itinéraire supprimé",
        )
        .await;
        if let Err(err) = &outcome {
            crate::net::note_failure(err, "Suppression de l'itinéraire", session);
        }
        outcome
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (cache, toasts, session, id);
        Err(ApiError::Network)
    }
}
