//! Public vehicle-code verification page.

use leptos::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::net::types::VerificationResult;
use crate::state::auth::SessionState;
use crate::state::query::QueryCache;
use crate::state::toast::ToastState;

/// Public page: check a unique vehicle code against the registry and list
/// currently active routes. No authentication required.
#[component]
pub fn VerifyPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let cache = expect_context::<RwSignal<QueryCache>>();

    let code_input = RwSignal::new(String::new());
    let result = RwSignal::new(None::<VerificationResult>);
    let checking = RwSignal::new(false);

    let active = LocalResource::new(move || {
        crate::net::itineraires::fetch_public_active(cache, toasts, session)
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "hydrate")]
        {
            use crate::util::code_unique::normalize_code_input;

            let code = normalize_code_input(&code_input.get_untracked());
            checking.set(true);
            leptos::task::spawn_local(async move {
                result.set(crate::net::verification::verify_code(cache, toasts, session, code).await);
                checking.set(false);
            });
        }
    };

    view! {
        <div class="verify-page">
            <header class="verify-page__header">
                <h1>"Vérification d'un code véhicule"</h1>
                <p>"Saisissez le code unique figurant sur le document de transport."</p>
            </header>

            <form class="verify-page__form" on:submit=on_submit>
                <input
                    class="verify-page__input"
                    type="text"
                    placeholder="LSH-25-SA000001"
                    prop:value=move || code_input.get()
                    on:input=move |ev| code_input.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" prop:disabled=move || checking.get()>
                    {move || if checking.get() { "Vérification…" } else { "Vérifier" }}
                </button>
            </form>

            {move || {
                result
                    .get()
                    .map(|r| {
                        if r.valide {
                            let detail = r
                                .itineraire
                                .map(|it| {
                                    format!(
                                        "{} ({} vers {}), propriétaire {}",
                                        it.vehicule_immatriculation,
                                        it.depart,
                                        it.destination,
                                        it.proprietaire_nom,
                                    )
                                })
                                .unwrap_or_default();
                            view! {
                                <div class="verify-page__result verify-page__result--valid">
                                    <h2>"Code valide"</h2>
                                    <p>{detail}</p>
                                </div>
                            }
                                .into_any()
                        } else {
                            let message = r
                                .message
                                .unwrap_or_else(|| "Ce code n'est pas enregistré.".to_owned());
                            view! {
                                <div class="verify-page__result verify-page__result--invalid">
                                    <h2>"Code invalide"</h2>
                                    <p>{message}</p>
                                </div>
                            }
                                .into_any()
                        }
                    })
            }}

            <section class="verify-page__active">
                <h2>"Itinéraires actifs"</h2>
                <Suspense fallback=move || view! { <p>"Chargement…"</p> }>
                    {move || {
                        active
                            .get()
                            .map(|maybe| match maybe {
                                Some(items) if !items.is_empty() => {
                                    view! {
                                        <ul class="verify-page__list">
                                            {items
                                                .into_iter()
                                                .map(|it| {
                                                    view! {
                                                        <li>
                                                            <span class="verify-page__code">
                                                                {it.code_unique.clone()}
                                                            </span>
                                                            {format!(
                                                                " {} vers {}",
                                                                it.depart,
                                                                it.destination,
                                                            )}
                                                        </li>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </ul>
                                    }
                                        .into_any()
                                }
                                Some(_) => {
                                    view! { <EmptyState message="Aucun itinéraire actif"/> }
                                        .into_any()
                                }
                                None => {
                                    view! { <EmptyState message="Liste indisponible"/> }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>
            </section>
        </div>
    }
}
