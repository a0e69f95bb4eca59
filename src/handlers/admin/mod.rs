//! Admin handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;

/// Admin routes; authentication is layered on by the parent router, and
/// every handler checks the admin role itself
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/users", get(handler::list_users))
        .route("/users/{id}", delete(handler::delete_user))
        .route("/users/{id}/role", patch(handler::update_role))
        .route("/tournaments", get(handler::list_tournaments))
        .route("/orders", get(handler::list_orders))
        .route("/orders/{id}/approve", post(handler::approve_order))
        .route("/orders/{id}/reject", post(handler::reject_order))
        .route("/settings", get(handler::list_settings))
        .route("/settings/{key}", put(handler::update_setting))
        .route("/audit-logs", get(handler::audit_log))
        .route("/reminders/run", post(handler::run_reminders))
}
