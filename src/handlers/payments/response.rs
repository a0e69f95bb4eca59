//! Payment response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::repositories::PendingPayment,
    models::{Payment, PaymentMethod, PaymentStatus},
};

/// Payment view
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payer_number: String,
    pub txn_id: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            tournament_id: p.tournament_id,
            amount: p.amount,
            payment_method: p.payment_method,
            payer_number: p.payer_number,
            txn_id: p.txn_id,
            status: p.status,
            created_at: p.created_at,
        }
    }
}

/// Pending payment with review context for the admin queue
#[derive(Debug, Serialize)]
pub struct PendingPaymentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub tournament_id: Uuid,
    pub tournament_name: String,
    pub entry_fee: i64,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payer_number: String,
    pub txn_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<PendingPayment> for PendingPaymentResponse {
    fn from(p: PendingPayment) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            user_name: p.user_name,
            user_email: p.user_email,
            tournament_id: p.tournament_id,
            tournament_name: p.tournament_name,
            entry_fee: p.entry_fee,
            amount: p.amount,
            payment_method: p.payment_method,
            payer_number: p.payer_number,
            txn_id: p.txn_id,
            created_at: p.created_at,
        }
    }
}

/// Pending payments list response
#[derive(Debug, Serialize)]
pub struct PendingPaymentsResponse {
    pub payments: Vec<PendingPaymentResponse>,
}
