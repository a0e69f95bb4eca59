//! Payment handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Payment routes (all require authentication)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handler::submit_payment))
        .route("/pending", get(handler::list_pending_payments))
        .route("/{id}/approve", post(handler::approve_payment))
        .route("/{id}/reject", post(handler::reject_payment))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
