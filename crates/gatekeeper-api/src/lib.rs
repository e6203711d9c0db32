//! Gatekeeper REST API
//!
//! This crate provides the Axum router for Gatekeeper: health checks and
//! the account endpoints guarded by the admin and user access gates.

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
