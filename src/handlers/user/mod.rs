//! User-facing participation handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{middleware, routing::get, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// User routes (all require authentication)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/tournaments", get(handler::my_tournaments))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
