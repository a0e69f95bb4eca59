//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod orders;
pub mod payments;
pub mod tournaments;
pub mod user;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest("/tournaments", tournaments::routes(state.clone()))
        .nest("/payments", payments::routes(state.clone()))
        .nest("/user", user::routes(state.clone()))
        .nest("/orders", orders::routes())
        .nest(
            "/admin",
            admin::routes().route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}
