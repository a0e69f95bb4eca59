//! Website order handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Public order routes; the admin queue lives under /admin
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_order))
        .route("/download/{token}", get(handler::download))
}
