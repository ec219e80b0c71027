//! Placeholder for lists with nothing to show.

use leptos::prelude::*;

/// Centered message shown instead of an empty table.
#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="empty-state">
            <p class="empty-state__message">{message}</p>
        </div>
    }
}
