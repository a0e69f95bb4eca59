//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::generate_token;
pub use time::age_in_years;
pub use validation::{validate_payer_number, validate_txn_id};
