//! Transient user notifications (toasts).
//!
//! Pure dispatch: pushing enqueues an arrival-ordered toast with a
//! monotonically increasing id; kinds carry their own auto-dismiss
//! duration, except `Loading` which stays until resolved. Multiple toasts
//! may coexist. The queue itself is a plain struct; timers and the
//! promise helper are the hydrate-gated layer on top.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

#[cfg(feature = "hydrate")]
use std::future::Future;

use leptos::prelude::{RwSignal, Update};

/// Outcome kind, which also decides the default display duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
    /// Pending operation; stays visible until resolved.
    Loading,
}

impl ToastKind {
    /// Auto-dismiss delay in milliseconds, or `None` for `Loading`.
    #[must_use]
    pub fn auto_dismiss_ms(self) -> Option<u32> {
        match self {
            ToastKind::Success | ToastKind::Info => Some(4_000),
            ToastKind::Warning => Some(5_000),
            ToastKind::Error => Some(6_000),
            ToastKind::Loading => None,
        }
    }

    /// CSS modifier for the toast host.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast--success",
            ToastKind::Error => "toast--error",
            ToastKind::Warning => "toast--warning",
            ToastKind::Info => "toast--info",
            ToastKind::Loading => "toast--loading",
        }
    }
}

/// One visible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Arrival-ordered toast queue provided via context.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Enqueue a toast; returns its id for later dismissal/resolution.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, kind, message: message.into() });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Resolve a pending toast in place (promise variant): same id, new
    /// kind and message. Returns `false` if it was already dismissed.
    pub fn resolve(&mut self, id: u64, kind: ToastKind, message: impl Into<String>) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.kind = kind;
                toast.message = message.into();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Push a toast and schedule its auto-dismissal.
pub fn push_toast(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) -> u64 {
    let mut id = 0;
    let message = message.into();
    toasts.update(|t| id = t.push(kind, message));
    schedule_dismiss(toasts, id, kind);
    id
}

/// Attach loading/success/error messages to a pending operation's three
/// outcomes. The loading toast is resolved in place once the future
/// completes; the result is passed through untouched.
#[cfg(feature = "hydrate")]
pub async fn toast_promise<T, E: std::fmt::Display>(
    toasts: RwSignal<ToastState>,
    pending: impl Future<Output = Result<T, E>>,
    loading: &str,
    success: &str,
) -> Result<T, E> {
    let mut id = 0;
    let loading = loading.to_owned();
    toasts.update(|t| id = t.push(ToastKind::Loading, loading));

    let outcome = pending.await;
    let (kind, message) = match &outcome {
        Ok(_) => (ToastKind::Success, success.to_owned()),
        Err(e) => (ToastKind::Error, e.to_string()),
    };
    toasts.update(|t| {
        t.resolve(id, kind, message);
    });
    schedule_dismiss(toasts, id, kind);
    outcome
}

fn schedule_dismiss(toasts: RwSignal<ToastState>, id: u64, kind: ToastKind) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(ms) = kind.auto_dismiss_ms() {
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
                toasts.update(|t| t.dismiss(id));
            });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (toasts, id, kind);
    }
}
