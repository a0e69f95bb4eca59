//! Website order repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{OrderStatus, PaymentMethod, WebsiteOrder},
};

/// Repository for website source-code order operations
pub struct OrderRepository;

impl OrderRepository {
    /// Create a pending order
    pub async fn create(
        pool: &PgPool,
        customer_name: &str,
        customer_email: &str,
        customer_phone: &str,
        amount: i64,
        payment_method: PaymentMethod,
        payer_number: &str,
        txn_id: &str,
    ) -> AppResult<WebsiteOrder> {
        let order = sqlx::query_as::<_, WebsiteOrder>(
            r#"
            INSERT INTO website_orders (
                customer_name, customer_email, customer_phone, amount,
                payment_method, payer_number, txn_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(customer_name)
        .bind(customer_email)
        .bind(customer_phone)
        .bind(amount)
        .bind(payment_method)
        .bind(payer_number)
        .bind(txn_id)
        .fetch_one(pool)
        .await?;

        Ok(order)
    }

    /// Find order by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<WebsiteOrder>> {
        let order =
            sqlx::query_as::<_, WebsiteOrder>(r#"SELECT * FROM website_orders WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(order)
    }

    /// Find order by its download token
    pub async fn find_by_token(pool: &PgPool, token: &str) -> AppResult<Option<WebsiteOrder>> {
        let order = sqlx::query_as::<_, WebsiteOrder>(
            r#"SELECT * FROM website_orders WHERE download_token = $1"#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// Approve a pending order, attaching its download token
    pub async fn approve_if_pending(
        pool: &PgPool,
        id: &Uuid,
        download_token: &str,
        token_expires_at: DateTime<Utc>,
        resolved_by: &Uuid,
    ) -> AppResult<Option<WebsiteOrder>> {
        let order = sqlx::query_as::<_, WebsiteOrder>(
            r#"
            UPDATE website_orders
            SET status = 'approved', download_token = $2, token_expires_at = $3, resolved_by = $4
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(download_token)
        .bind(token_expires_at)
        .bind(resolved_by)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// Reject a pending order
    pub async fn reject_if_pending(
        pool: &PgPool,
        id: &Uuid,
        resolved_by: &Uuid,
    ) -> AppResult<Option<WebsiteOrder>> {
        let order = sqlx::query_as::<_, WebsiteOrder>(
            r#"
            UPDATE website_orders
            SET status = 'rejected', resolved_by = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(resolved_by)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// List orders with pagination and optional status filter
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        status: Option<OrderStatus>,
    ) -> AppResult<(Vec<WebsiteOrder>, i64)> {
        let orders = sqlx::query_as::<_, WebsiteOrder>(
            r#"
            SELECT * FROM website_orders
            WHERE ($1::order_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM website_orders
            WHERE ($1::order_status IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((orders, count))
    }
}
