//! Reusable presentational components.

pub mod empty_state;
pub mod route_guard;
pub mod stat_card;
pub mod toast_host;
