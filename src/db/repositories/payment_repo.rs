//! Payment repository

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Payment, PaymentMethod, PaymentStatus},
};

/// Repository for payment database operations
pub struct PaymentRepository;

impl PaymentRepository {
    /// Create a pending payment inside the caller's transaction
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: &Uuid,
        tournament_id: &Uuid,
        amount: i64,
        payment_method: PaymentMethod,
        payer_number: &str,
        txn_id: &str,
    ) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (user_id, tournament_id, amount, payment_method, payer_number, txn_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(tournament_id)
        .bind(amount)
        .bind(payment_method)
        .bind(payer_number)
        .bind(txn_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(payment)
    }

    /// Find payment by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(r#"SELECT * FROM payments WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(payment)
    }

    /// Resolve a payment only while it is still pending, inside the caller's
    /// transaction.
    ///
    /// The WHERE guard makes concurrent approve/reject race to a single
    /// winner; the loser gets None.
    pub async fn resolve_if_pending(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: &Uuid,
        to: PaymentStatus,
        resolved_by: &Uuid,
    ) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = $2, resolved_by = $3, resolved_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(to)
        .bind(resolved_by)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(payment)
    }

    /// Pending payments with submitter and tournament context, oldest first
    pub async fn list_pending(pool: &PgPool) -> AppResult<Vec<PendingPayment>> {
        let rows = sqlx::query_as::<_, PendingPayment>(
            r#"
            SELECT
                pay.id, pay.user_id, pay.tournament_id, pay.amount,
                pay.payment_method, pay.payer_number, pay.txn_id,
                pay.status, pay.created_at,
                u.name AS user_name, u.email AS user_email,
                t.name AS tournament_name, t.entry_fee
            FROM payments pay
            JOIN users u ON u.id = pay.user_id
            JOIN tournaments t ON t.id = pay.tournament_id
            WHERE pay.status = 'pending'
            ORDER BY pay.created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

/// A pending payment with review context for the admin queue
#[derive(Debug, Clone, FromRow)]
pub struct PendingPayment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tournament_id: Uuid,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payer_number: String,
    pub txn_id: String,
    pub status: PaymentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_name: String,
    pub user_email: String,
    pub tournament_name: String,
    pub entry_fee: i64,
}
