//! Website order request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_NAME_LENGTH, models::PaymentMethod};

/// Place a website source-code order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub customer_name: String,

    #[validate(email)]
    pub customer_email: String,

    #[validate(length(min = 1))]
    pub customer_phone: String,

    /// Must equal the fixed package price, in minor currency units
    pub amount: i64,

    pub payment_method: PaymentMethod,

    pub payer_number: String,

    pub txn_id: String,
}
