//! Account endpoints behind the access gates

use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use gatekeeper_auth::{Admin, Credential, User, access_gate};
use serde_json::{Value, json};
use tracing::debug;

use crate::state::AppState;

/// GET /api/admin/me
async fn admin_me(admin: Credential<Admin>) -> Json<Value> {
    debug!("Admin profile requested: {:?}", admin.decoded().subject());

    Json(json!({
        "success": true,
        "admin": admin.claims(),
    }))
}

/// GET /api/user/me
async fn user_me(user: Credential<User>) -> Json<Value> {
    debug!("User profile requested: {:?}", user.decoded().subject());

    Json(json!({
        "success": true,
        "user": user.claims(),
    }))
}

/// Create account routes, each group wrapped in its own gate
pub fn routes(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/api/admin/me", get(admin_me))
        .route_layer(from_fn_with_state(
            state.admin_gate.clone(),
            access_gate::<Admin>,
        ));

    let user = Router::new()
        .route("/api/user/me", get(user_me))
        .route_layer(from_fn_with_state(
            state.user_gate.clone(),
            access_gate::<User>,
        ));

    admin.merge(user)
}
