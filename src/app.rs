//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast_host::ToastHost;
use crate::pages::{
    dashboard::DashboardPage, itineraires::ItinerairesPage, login::LoginPage, verify::VerifyPage,
};
use crate::state::auth::SessionState;
use crate::state::query::QueryCache;
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Restores any persisted session, provides the shared state contexts
/// (session, toast queue, query cache), and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Restore the persisted session before the first render, so guarded
    // pages do not flash the login redirect on a reload.
    let initial = crate::util::session_storage::load_session()
        .map_or_else(SessionState::default, SessionState::restored);

    let session = RwSignal::new(initial);
    let toasts = RwSignal::new(ToastState::default());
    let cache = RwSignal::new(QueryCache::default());

    provide_context(session);
    provide_context(toasts);
    provide_context(cache);

    #[cfg(feature = "hydrate")]
    {
        spawn_token_probe(session, toasts);
        install_focus_refresh(cache);
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/immat-ui.css"/>
        <Title text="Immatriculation"/>

        <ToastHost/>

        <Router>
            <Routes fallback=|| "Page introuvable.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("itineraires") view=ItinerairesPage/>
                <Route path=StaticSegment("verification") view=VerifyPage/>
            </Routes>
        </Router>
    }
}

/// Probe the backend once with the restored token. Only a definite
/// rejection destroys the session; an unreachable backend keeps it so the
/// app stays usable offline and revalidates on the next interaction.
#[cfg(feature = "hydrate")]
fn spawn_token_probe(session: RwSignal<SessionState>, toasts: RwSignal<ToastState>) {
    use crate::net::auth::TokenStatus;
    use crate::state::toast::{ToastKind, push_toast};

    if !session.get_untracked().is_authenticated() {
        return;
    }

    leptos::task::spawn_local(async move {
        match crate::net::auth::validate_token().await {
            TokenStatus::Invalid => {
                crate::util::session_storage::clear_session();
                session.update(SessionState::expire);
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    "Session expirée, veuillez vous reconnecter",
                );
            }
            TokenStatus::Valid => {}
            TokenStatus::Unreachable => {
                leptos::logging::warn!("token probe: backend unreachable, keeping session");
            }
        }
    });
}

/// Mark every cached query stale when the window regains focus, so the
/// next render refetches in the background.
#[cfg(feature = "hydrate")]
fn install_focus_refresh(cache: RwSignal<QueryCache>) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::Closure;

    let enabled = cache.try_with_untracked(|c| c.config().refetch_on_focus).unwrap_or(false);
    if !enabled {
        return;
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let on_focus = Closure::<dyn FnMut()>::new(move || {
        cache.update(QueryCache::mark_all_stale);
    });
    let _ = window.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
    // The listener lives for the whole tab session.
    on_focus.forget();
}
