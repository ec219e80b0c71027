//! Browser glue and pure helpers shared across pages.

pub mod code_unique;
pub mod debounce;
pub mod session_storage;
