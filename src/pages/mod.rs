//! Top-level routed pages.

pub mod dashboard;
pub mod itineraires;
pub mod login;
pub mod verify;
