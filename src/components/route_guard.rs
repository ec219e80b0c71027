//! Auth and role gate for protected pages.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{SessionPhase, SessionState};

/// Renders its children only for an authenticated user whose role is in
/// `allowed_roles` (empty set: any authenticated user). Unauthenticated
/// visitors are redirected to `/login`; a wrong role gets an access-denied
/// view instead.
#[component]
pub fn RouteGuard(
    #[prop(optional)] allowed_roles: Vec<&'static str>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    // Redirect to login once the session settles as absent.
    Effect::new(move || {
        let state = session.get();
        if state.phase != SessionPhase::Authenticating && !state.is_authenticated() {
            navigate("/login", NavigateOptions::default());
        }
    });

    let roles = StoredValue::new(allowed_roles);

    view! {
        <Show
            when=move || session.get().has_role(&roles.get_value())
            fallback=move || {
                view! {
                    <div class="route-guard__denied">
                        <h2>"Accès refusé"</h2>
                        <p>"Vous n'avez pas les droits nécessaires pour consulter cette page."</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
