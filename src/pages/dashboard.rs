//! Dashboard with registration and verification counters.

use leptos::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::components::route_guard::RouteGuard;
use crate::components::stat_card::StatCard;
use crate::state::auth::SessionState;
use crate::state::query::QueryCache;
use crate::state::toast::ToastState;

/// Dashboard page — stat cards fed by the cached stats queries.
/// Access requires an authenticated session (any role).
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let cache = expect_context::<RwSignal<QueryCache>>();

    let stats =
        LocalResource::new(move || crate::net::itineraires::fetch_stats(cache, toasts, session));
    let verify_stats = LocalResource::new(move || {
        crate::net::verification::fetch_verify_stats(cache, toasts, session)
    });

    let user_name = move || {
        session
            .get()
            .current_user()
            .map(|u| u.name.clone())
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        crate::util::session_storage::clear_session();
        session.update(SessionState::logout);
    };

    view! {
        <RouteGuard>
            <div class="dashboard-page">
                <header class="dashboard-page__header">
                    <h1>"Tableau de bord"</h1>
                    <span class="dashboard-page__user">{user_name}</span>
                    <nav class="dashboard-page__nav">
                        <a href="/itineraires">"Itinéraires"</a>
                        <a href="/verification">"Vérification"</a>
                    </nav>
                    <button class="btn" on:click=on_logout>
                        "Se déconnecter"
                    </button>
                </header>

                <section class="dashboard-page__section">
                    <h2>"Itinéraires"</h2>
                    <Suspense fallback=move || view! { <p>"Chargement…"</p> }>
                        {move || {
                            stats
                                .get()
                                .map(|maybe| match maybe {
                                    Some(s) => {
                                        view! {
                                            <div class="dashboard-page__stats">
                                                <StatCard label="Total" value=s.total/>
                                                <StatCard label="Actifs" value=s.actifs/>
                                                <StatCard label="Expirés" value=s.expires/>
                                                <StatCard label="Ce mois" value=s.ce_mois/>
                                            </div>
                                        }
                                            .into_any()
                                    }
                                    None => {
                                        view! {
                                            <EmptyState message="Statistiques indisponibles"/>
                                        }
                                            .into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </section>

                <section class="dashboard-page__section">
                    <h2>"Vérifications"</h2>
                    <Suspense fallback=move || view! { <p>"Chargement…"</p> }>
                        {move || {
                            verify_stats
                                .get()
                                .map(|maybe| match maybe {
                                    Some(s) => {
                                        view! {
                                            <div class="dashboard-page__stats">
                                                <StatCard label="Vérifications" value=s.total_verifications/>
                                                <StatCard label="Codes valides" value=s.codes_valides/>
                                                <StatCard label="Codes invalides" value=s.codes_invalides/>
                                            </div>
                                        }
                                            .into_any()
                                    }
                                    None => {
                                        view! {
                                            <EmptyState message="Statistiques indisponibles"/>
                                        }
                                            .into_any()
                                    }
                                })
                        }}
                    </Suspense>
                </section>
            </div>
        </RouteGuard>
    }
}
