//! Route management page: list, debounced search, create/edit, delete.

use leptos::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::components::route_guard::RouteGuard;
use crate::net::types::{Itineraire, ItineraireInput};
use crate::state::auth::SessionState;
use crate::state::query::QueryCache;
use crate::state::toast::ToastState;
use crate::util::debounce::{Debouncer, RequestAbort};

/// Pause after the last keystroke before a search request leaves.
#[cfg(feature = "hydrate")]
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Itinerary management — restricted to staff roles.
///
/// Search is debounced and supersedes itself: a burst of keystrokes
/// produces one request for the final value, and any request still in
/// flight is aborted when a newer one leaves.
#[component]
pub fn ItinerairesPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let cache = expect_context::<RwSignal<QueryCache>>();

    let list = LocalResource::new(move || {
        crate::net::itineraires::fetch_itineraires(cache, toasts, session)
    });

    let search = RwSignal::new(String::new());
    let search_results = RwSignal::new(None::<Vec<Itineraire>>);
    let debouncer = StoredValue::new_local(Debouncer::new());
    let aborter = StoredValue::new_local(RequestAbort::new());

    let show_dialog = RwSignal::new(false);
    let editing = RwSignal::new(None::<Itineraire>);

    let on_search = move |ev| {
        search.set(event_target_value(&ev));
        #[cfg(feature = "hydrate")]
        {
            let token = debouncer.get_value().begin();
            leptos::task::spawn_local(async move {
                if !crate::util::debounce::settle(&debouncer.get_value(), token, SEARCH_DEBOUNCE_MS)
                    .await
                {
                    return;
                }
                let query = search.get_untracked().trim().to_owned();
                if query.is_empty() {
                    search_results.set(None);
                    return;
                }
                let signal = aborter.get_value().renew();
                let found =
                    crate::net::itineraires::search_itineraires(toasts, session, query, signal)
                        .await;
                if let Some(items) = found {
                    // A newer keystroke may have landed while we fetched.
                    if debouncer.get_value().is_current(token) {
                        search_results.set(Some(items));
                    }
                }
            });
        }
    };

    let on_create = move |_| {
        editing.set(None);
        show_dialog.set(true);
    };

    let on_edit = Callback::new(move |item: Itineraire| {
        #[cfg(feature = "hydrate")]
        {
            // Edit against the latest copy; fall back to the row on failure.
            leptos::task::spawn_local(async move {
                let fresh = crate::net::itineraires::fetch_itineraire(
                    cache,
                    toasts,
                    session,
                    item.id.to_string(),
                )
                .await;
                editing.set(Some(fresh.unwrap_or(item)));
                show_dialog.set(true);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            editing.set(Some(item));
            show_dialog.set(true);
        }
    });

    let on_delete = Callback::new(move |id: uuid::Uuid| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let outcome = crate::net::itineraires::delete_itineraire(
                    cache,
                    toasts,
                    session,
                    id.to_string(),
                )
                .await;
                if outcome.is_ok() {
                    search_results.set(None);
                    list.refetch();
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    });

    let on_close = Callback::new(move |()| show_dialog.set(false));

    view! {
        <RouteGuard allowed_roles=vec!["admin", "agent"]>
            <div class="itineraires-page">
                <header class="itineraires-page__header">
                    <h1>"Itinéraires"</h1>
                    <a href="/">"Tableau de bord"</a>
                    <button class="btn btn--primary" on:click=on_create>
                        "+ Nouvel itinéraire"
                    </button>
                </header>

                <input
                    class="itineraires-page__search"
                    type="search"
                    placeholder="Rechercher un code, un départ, une destination…"
                    prop:value=move || search.get()
                    on:input=on_search
                />

                <Suspense fallback=move || view! { <p>"Chargement des itinéraires…"</p> }>
                    {move || {
                        let displayed = match search_results.get() {
                            Some(items) => Some(Some(items)),
                            None => list.get(),
                        };
                        displayed
                            .map(|maybe| match maybe {
                                Some(items) if !items.is_empty() => {
                                    view! {
                                        <table class="itineraires-page__table">
                                            <thead>
                                                <tr>
                                                    <th>"Code unique"</th>
                                                    <th>"Départ"</th>
                                                    <th>"Destination"</th>
                                                    <th>"Véhicule"</th>
                                                    <th>"Propriétaire"</th>
                                                    <th>"Statut"</th>
                                                    <th></th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {items
                                                    .into_iter()
                                                    .map(|item| {
                                                        view! {
                                                            <ItineraireRow
                                                                item=item
                                                                on_edit=on_edit
                                                                on_delete=on_delete
                                                            />
                                                        }
                                                    })
                                                    .collect::<Vec<_>>()}
                                            </tbody>
                                        </table>
                                    }
                                        .into_any()
                                }
                                Some(_) => {
                                    view! { <EmptyState message="Aucun itinéraire trouvé"/> }
                                        .into_any()
                                }
                                None => {
                                    view! { <EmptyState message="Liste indisponible"/> }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>

                <Show when=move || show_dialog.get()>
                    {move || {
                        view! {
                            <ItineraireDialog initial=editing.get() on_close=on_close list=list/>
                        }
                    }}
                </Show>
            </div>
        </RouteGuard>
    }
}

/// One table row with edit/delete actions.
#[component]
fn ItineraireRow(
    item: Itineraire,
    on_edit: Callback<Itineraire>,
    on_delete: Callback<uuid::Uuid>,
) -> impl IntoView {
    let id = item.id;
    let edit_item = item.clone();

    view! {
        <tr class="itineraires-page__row">
            <td class="itineraires-page__code">{item.code_unique.clone()}</td>
            <td>{item.depart.clone()}</td>
            <td>{item.destination.clone()}</td>
            <td>{item.vehicule_immatriculation.clone()}</td>
            <td>{item.proprietaire_nom.clone()}</td>
            <td>{item.statut.label()}</td>
            <td class="itineraires-page__actions">
                <button class="btn" on:click=move |_| on_edit.run(edit_item.clone())>
                    "Modifier"
                </button>
                <button class="btn btn--danger" on:click=move |_| on_delete.run(id)>
                    "Supprimer"
                </button>
            </td>
        </tr>
    }
}

/// Modal form for creating or editing a route. On a write failure the
/// dialog stays open with its fields intact, per the write-propagation
/// contract.
#[component]
fn ItineraireDialog(
    initial: Option<Itineraire>,
    on_close: Callback<()>,
    list: LocalResource<Option<Vec<Itineraire>>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let cache = expect_context::<RwSignal<QueryCache>>();

    let title = if initial.is_some() { "Modifier l'itinéraire" } else { "Nouvel itinéraire" };
    let editing_id = StoredValue::new(initial.as_ref().map(|i| i.id.to_string()));

    let code = RwSignal::new(initial.as_ref().map(|i| i.code_unique.clone()).unwrap_or_default());
    let depart = RwSignal::new(initial.as_ref().map(|i| i.depart.clone()).unwrap_or_default());
    let destination =
        RwSignal::new(initial.as_ref().map(|i| i.destination.clone()).unwrap_or_default());
    let immatriculation = RwSignal::new(
        initial.as_ref().map(|i| i.vehicule_immatriculation.clone()).unwrap_or_default(),
    );
    let proprietaire =
        RwSignal::new(initial.as_ref().map(|i| i.proprietaire_nom.clone()).unwrap_or_default());
    let date_depart = RwSignal::new(
        initial.as_ref().and_then(|i| i.date_depart.clone()).unwrap_or_default(),
    );

    let submit = Callback::new(move |()| {
        #[cfg(feature = "hydrate")]
        {
            use crate::state::toast::{ToastKind, push_toast};
            use crate::util::code_unique::{is_valid_code_unique, normalize_code_input};

            let code_value = normalize_code_input(&code.get_untracked());
            if !is_valid_code_unique(&code_value) {
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    "Format de code invalide (attendu : AAA-99-AA999999)",
                );
                return;
            }

            let date = date_depart.get_untracked();
            let input = ItineraireInput {
                code_unique: code_value,
                depart: depart.get_untracked().trim().to_owned(),
                destination: destination.get_untracked().trim().to_owned(),
                vehicule_immatriculation: immatriculation.get_untracked().trim().to_owned(),
                proprietaire_nom: proprietaire.get_untracked().trim().to_owned(),
                date_depart: if date.is_empty() { None } else { Some(date) },
            };
            if input.depart.is_empty() || input.destination.is_empty() {
                push_toast(toasts, ToastKind::Warning, "Départ et destination sont requis");
                return;
            }

            leptos::task::spawn_local(async move {
                let outcome = match editing_id.get_value() {
                    Some(id) => {
                        crate::net::itineraires::update_itineraire(cache, toasts, session, id, input)
                            .await
                            .map(|_| ())
                    }
                    None => {
                        crate::net::itineraires::create_itineraire(cache, toasts, session, input)
                            .await
                            .map(|_| ())
                    }
                };
                if outcome.is_ok() {
                    list.refetch();
                    on_close.run(());
                }
            });
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{title}</h2>

                <label class="dialog__label">
                    "Code unique"
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="LSH-25-SA000001"
                        prop:value=move || code.get()
                        on:input=move |ev| code.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Départ"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || depart.get()
                        on:input=move |ev| depart.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Destination"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || destination.get()
                        on:input=move |ev| destination.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Immatriculation du véhicule"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || immatriculation.get()
                        on:input=move |ev| immatriculation.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Nom du propriétaire"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || proprietaire.get()
                        on:input=move |ev| proprietaire.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Date de départ"
                    <input
                        class="dialog__input"
                        type="date"
                        prop:value=move || date_depart.get()
                        on:input=move |ev| date_depart.set(event_target_value(&ev))
                    />
                </label>

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Annuler"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Enregistrer"
                    </button>
                </div>
            </div>
        </div>
    }
}
