//! Audit log repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::AuditLog};

/// Repository for the append-only audit log
pub struct AuditRepository;

impl AuditRepository {
    /// Record an action
    pub async fn create(
        pool: &PgPool,
        actor_id: Option<&Uuid>,
        action: &str,
        entity_type: &str,
        entity_id: Option<&Uuid>,
        details: Option<serde_json::Value>,
    ) -> AppResult<AuditLog> {
        let entry = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (actor_id, action, entity_type, entity_id, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(actor_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(details)
        .fetch_one(pool)
        .await?;

        Ok(entry)
    }

    /// Record an action inside the caller's transaction, so the audit entry
    /// commits or rolls back with the action it describes
    pub async fn create_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        actor_id: Option<&Uuid>,
        action: &str,
        entity_type: &str,
        entity_id: Option<&Uuid>,
        details: Option<serde_json::Value>,
    ) -> AppResult<AuditLog> {
        let entry = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (actor_id, action, entity_type, entity_id, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(actor_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(details)
        .fetch_one(&mut **tx)
        .await?;

        Ok(entry)
    }

    /// Most recent entries, newest first
    pub async fn list_recent(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AuditLog>, i64)> {
        let entries = sqlx::query_as::<_, AuditLog>(
            r#"SELECT * FROM audit_logs ORDER BY created_at DESC OFFSET $1 LIMIT $2"#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM audit_logs"#)
            .fetch_one(pool)
            .await?;

        Ok((entries, count))
    }
}
