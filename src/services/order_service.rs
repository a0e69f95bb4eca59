//! Website source-code order service

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{DOWNLOAD_TOKEN_EXPIRY_DAYS, DOWNLOAD_TOKEN_LENGTH, WEBSITE_ORDER_PRICE},
    db::repositories::{AuditRepository, OrderRepository},
    error::{AppError, AppResult},
    models::{OrderStatus, PaymentMethod, WebsiteOrder},
    utils::crypto::generate_token,
};

/// Fields accepted when placing a website order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payer_number: String,
    pub txn_id: String,
}

/// Website order service
pub struct OrderService;

impl OrderService {
    /// Place an order for the website source-code package.
    ///
    /// The price is fixed; any other amount is rejected up front rather
    /// than left for the admin to spot.
    pub async fn create(pool: &PgPool, new: NewOrder) -> AppResult<WebsiteOrder> {
        if new.amount != WEBSITE_ORDER_PRICE {
            return Err(AppError::Validation(format!(
                "Order amount {} does not match the package price {}",
                new.amount, WEBSITE_ORDER_PRICE
            )));
        }

        let order = OrderRepository::create(
            pool,
            &new.customer_name,
            &new.customer_email,
            &new.customer_phone,
            new.amount,
            new.payment_method,
            &new.payer_number,
            &new.txn_id,
        )
        .await?;

        AuditRepository::create(
            pool,
            None,
            "order_submitted",
            "website_order",
            Some(&order.id),
            Some(serde_json::json!({ "email": order.customer_email })),
        )
        .await?;

        tracing::info!(order_id = %order.id, "Website order submitted");

        Ok(order)
    }

    /// Approve a pending order, minting its time-limited download token
    pub async fn approve(
        pool: &PgPool,
        admin_id: &Uuid,
        order_id: &Uuid,
    ) -> AppResult<WebsiteOrder> {
        let token = generate_token(DOWNLOAD_TOKEN_LENGTH);
        let expires_at = Utc::now() + Duration::days(DOWNLOAD_TOKEN_EXPIRY_DAYS);

        let order = OrderRepository::approve_if_pending(pool, order_id, &token, expires_at, admin_id)
            .await?
            .ok_or(AppError::AlreadyResolved)?;

        AuditRepository::create(
            pool,
            Some(admin_id),
            "order_approved",
            "website_order",
            Some(order_id),
            None,
        )
        .await?;

        tracing::info!(order_id = %order_id, "Website order approved");

        Ok(order)
    }

    /// Reject a pending order
    pub async fn reject(
        pool: &PgPool,
        admin_id: &Uuid,
        order_id: &Uuid,
    ) -> AppResult<WebsiteOrder> {
        let order = OrderRepository::reject_if_pending(pool, order_id, admin_id)
            .await?
            .ok_or(AppError::AlreadyResolved)?;

        AuditRepository::create(
            pool,
            Some(admin_id),
            "order_rejected",
            "website_order",
            Some(order_id),
            None,
        )
        .await?;

        Ok(order)
    }

    /// Resolve a download token to its order, enforcing the expiry window
    pub async fn validate_download(
        pool: &PgPool,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<WebsiteOrder> {
        let order = OrderRepository::find_by_token(pool, token)
            .await?
            .ok_or_else(|| AppError::NotFound("Download link not found".to_string()))?;

        if !order.token_valid_at(now) {
            return Err(AppError::Gone("Download link has expired".to_string()));
        }

        Ok(order)
    }

    /// List orders for the admin queue
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        status: Option<OrderStatus>,
    ) -> AppResult<(Vec<WebsiteOrder>, i64)> {
        OrderRepository::list(pool, offset, limit, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, seed};

    fn new_order() -> NewOrder {
        NewOrder {
            customer_name: "Test Customer".to_string(),
            customer_email: format!("customer-{}@example.com", Uuid::new_v4()),
            customer_phone: "01700000000".to_string(),
            amount: WEBSITE_ORDER_PRICE,
            payment_method: PaymentMethod::Bkash,
            payer_number: "01700000000".to_string(),
            txn_id: format!("TX{}", Uuid::new_v4().simple()),
        }
    }

    #[tokio::test]
    async fn test_download_token_expires_into_gone() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;

        let order = OrderService::create(&pool, new_order()).await.unwrap();
        let approved = OrderService::approve(&pool, &admin.id, &order.id)
            .await
            .unwrap();
        let token = approved.download_token.clone().unwrap();

        let fresh = OrderService::validate_download(&pool, &token, Utc::now())
            .await
            .unwrap();
        assert_eq!(fresh.id, order.id);

        let after_expiry = Utc::now() + Duration::days(DOWNLOAD_TOKEN_EXPIRY_DAYS + 1);
        let expired = OrderService::validate_download(&pool, &token, after_expiry).await;
        assert!(matches!(expired, Err(AppError::Gone(_))));
    }

    #[tokio::test]
    async fn test_order_resolves_only_once() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;

        let order = OrderService::create(&pool, new_order()).await.unwrap();
        OrderService::approve(&pool, &admin.id, &order.id)
            .await
            .unwrap();

        let again = OrderService::reject(&pool, &admin.id, &order.id).await;
        assert!(matches!(again, Err(AppError::AlreadyResolved)));
    }
}
