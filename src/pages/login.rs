//! Login page with a credential form.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

use crate::state::auth::{SessionPhase, SessionState};
use crate::state::toast::ToastState;

/// Credential form. A successful login stores the session (token + user
/// together) and redirects to the dashboard; a failed one leaves the form
/// and any previous session untouched.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let authenticating = move || session.get().phase == SessionPhase::Authenticating;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "hydrate")]
        {
            let email_value = email.get_untracked().trim().to_owned();
            let password_value = password.get_untracked();
            if email_value.is_empty() || password_value.is_empty() {
                return;
            }

            let navigate = navigate.clone();
            session.update(SessionState::begin_login);
            leptos::task::spawn_local(async move {
                match crate::net::auth::login(toasts, email_value, password_value).await {
                    Ok(new_session) => {
                        crate::util::session_storage::store_session(&new_session);
                        session.update(|s| s.complete_login(new_session));
                        navigate("/", NavigateOptions::default());
                    }
                    Err(_) => session.update(SessionState::fail_login),
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <h1>"Immatriculation"</h1>
            <p>"Gestion des itinéraires et documents de transport"</p>

            <form class="login-page__form" on:submit=on_submit>
                <label class="login-page__label">
                    "E-mail"
                    <input
                        class="login-page__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-page__label">
                    "Mot de passe"
                    <input
                        class="login-page__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" prop:disabled=authenticating>
                    {move || if authenticating() { "Connexion…" } else { "Se connecter" }}
                </button>
            </form>

            <a class="login-page__public-link" href="/verification">
                "Vérifier un code véhicule"
            </a>
        </div>
    }
}
