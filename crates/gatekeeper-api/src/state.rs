//! Application state

use gatekeeper_auth::{AdminGate, UserGate};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub admin_gate: AdminGate,
    pub user_gate: UserGate,
}

impl AppState {
    pub fn new(admin_gate: AdminGate, user_gate: UserGate) -> Self {
        Self {
            admin_gate,
            user_gate,
        }
    }
}
