//! # immat-ui
//!
//! Leptos + WASM frontend for the vehicle-registration management
//! application. Replaces the Next.js client with a Rust-native UI layer.
//!
//! This crate contains pages, components, application state (session, toast
//! queue, query cache), and the typed REST client for the registration
//! backend. All browser-only logic is gated behind the `hydrate` feature.

pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

mod app;

pub use app::{App, shell};

/// WASM entry point for client-side hydration.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(App);
}
