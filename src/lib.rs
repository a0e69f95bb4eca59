//! FF Arena - Tournament Registration and Payment Verification Platform
//!
//! Backend for a gaming tournament platform with manual mobile-wallet
//! payment verification, time-gated disclosure of secret match
//! credentials, and exactly-once start-time reminders.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and database enums
//!
//! A background scheduler evaluates reminder milestones; notifications
//! leave through a pluggable gateway.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
