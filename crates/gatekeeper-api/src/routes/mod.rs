//! API routes

mod account;
mod health;

use axum::Router;

use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .merge(health::routes())
        // Gated account endpoints
        .merge(account::routes(&state))
        .with_state(state)
}
