//! Tournament handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Tournament routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(handler::create_tournament))
        .route("/{id}", patch(handler::update_tournament))
        .route("/{id}", delete(handler::delete_tournament))
        .route("/{id}/status", patch(handler::transition_tournament))
        .route("/{id}/join", post(handler::join_tournament))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(handler::list_tournaments))
        .route("/{id}", get(handler::get_tournament))
        .merge(protected)
}
