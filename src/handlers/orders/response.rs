//! Website order response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{OrderStatus, PaymentMethod, WebsiteOrder};

/// Public order view; the download token only appears once the order is
/// approved, via the admin view
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<WebsiteOrder> for OrderResponse {
    fn from(o: WebsiteOrder) -> Self {
        Self {
            id: o.id,
            customer_name: o.customer_name,
            customer_email: o.customer_email,
            amount: o.amount,
            payment_method: o.payment_method,
            status: o.status,
            created_at: o.created_at,
        }
    }
}

/// Admin order view, including the download token and payer details
#[derive(Debug, Serialize)]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub customer_phone: String,
    pub payer_number: String,
    pub txn_id: String,
    pub download_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl From<WebsiteOrder> for AdminOrderResponse {
    fn from(o: WebsiteOrder) -> Self {
        let customer_phone = o.customer_phone.clone();
        let payer_number = o.payer_number.clone();
        let txn_id = o.txn_id.clone();
        let download_token = o.download_token.clone();
        let token_expires_at = o.token_expires_at;
        Self {
            order: o.into(),
            customer_phone,
            payer_number,
            txn_id,
            download_token,
            token_expires_at,
        }
    }
}

/// Admin order list response
#[derive(Debug, Serialize)]
pub struct OrdersListResponse {
    pub orders: Vec<AdminOrderResponse>,
    pub total: i64,
}

/// Successful download token validation
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub order_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub message: String,
}
