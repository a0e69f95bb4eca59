//! Website source-code order model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::payment::PaymentMethod;

/// A purchase of the website source-code package.
///
/// Orders carry their own payment details (no tournament involved) and,
/// once approved, a time-limited download token.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WebsiteOrder {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payer_number: String,
    pub txn_id: String,
    pub status: OrderStatus,
    #[serde(skip_serializing)]
    pub download_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl WebsiteOrder {
    /// Whether the download token is present and unexpired at `now`
    pub fn token_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.status == OrderStatus::Approved
            && self.download_token.is_some()
            && self.token_expires_at.is_some_and(|exp| now < exp)
    }
}

/// Order verification status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn order(status: OrderStatus, expires: Option<DateTime<Utc>>) -> WebsiteOrder {
        WebsiteOrder {
            id: Uuid::new_v4(),
            customer_name: "Test Customer".to_string(),
            customer_email: "customer@example.com".to_string(),
            customer_phone: "01700000000".to_string(),
            amount: crate::constants::WEBSITE_ORDER_PRICE,
            payment_method: PaymentMethod::Bkash,
            payer_number: "01700000000".to_string(),
            txn_id: "TXN123".to_string(),
            status,
            download_token: Some("tok".to_string()),
            token_expires_at: expires,
            resolved_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_validity_window() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let fresh = order(OrderStatus::Approved, Some(now + Duration::days(1)));
        assert!(fresh.token_valid_at(now));

        let expired = order(OrderStatus::Approved, Some(now - Duration::seconds(1)));
        assert!(!expired.token_valid_at(now));

        let pending = order(OrderStatus::Pending, Some(now + Duration::days(1)));
        assert!(!pending.token_valid_at(now));
    }
}
