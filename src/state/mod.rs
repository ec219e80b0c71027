//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `query`, `toast`) so individual
//! components can depend on small focused models. Each module is a plain
//! struct provided to the tree as an `RwSignal` context; the structs
//! themselves are browser-free and unit-tested off WASM.

pub mod auth;
pub mod query;
pub mod toast;
