//! Fixed overlay rendering the toast queue.

use leptos::prelude::*;

use crate::state::toast::ToastState;

/// Renders every live toast in arrival order; each carries a manual close
/// button on top of its kind's auto-dismiss timer.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .toasts()
                    .iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = format!("toast {}", toast.kind.css_class());
                        let message = toast.message.clone();
                        view! {
                            <div class=class>
                                <span class="toast__message">{message}</span>
                                <button
                                    class="toast__close"
                                    on:click=move |_| toasts.update(|t| t.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
