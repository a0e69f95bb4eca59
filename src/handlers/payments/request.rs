//! Payment request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::PaymentMethod;

/// Submit payment request
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitPaymentRequest {
    pub tournament_id: Uuid,

    /// Amount in minor currency units; must equal the entry fee exactly
    #[validate(range(min = 0))]
    pub amount: i64,

    pub payment_method: PaymentMethod,

    pub payer_number: String,

    pub txn_id: String,
}
