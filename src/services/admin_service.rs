//! Admin service

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{
        AuditRepository, SettingsRepository, TournamentRepository, UserRepository,
    },
    error::{AppError, AppResult},
    models::{AuditLog, Setting, User, UserRole},
};

/// Aggregate platform counters for the admin dashboard
#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_tournaments: i64,
    pub pending_payments: i64,
    pub pending_orders: i64,
}

/// Admin service
pub struct AdminService;

impl AdminService {
    /// Aggregate counters for the dashboard
    pub async fn stats(pool: &PgPool) -> AppResult<PlatformStats> {
        let total_users = UserRepository::count(pool).await?;
        let total_tournaments = TournamentRepository::count(pool).await?;

        let pending_payments: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM payments WHERE status = 'pending'"#)
                .fetch_one(pool)
                .await?;

        let pending_orders: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM website_orders WHERE status = 'pending'"#)
                .fetch_one(pool)
                .await?;

        Ok(PlatformStats {
            total_users,
            total_tournaments,
            pending_payments,
            pending_orders,
        })
    }

    /// List users
    pub async fn list_users(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        UserRepository::list(pool, offset, limit).await
    }

    /// Change a user's role. Only super admins may grant or revoke roles,
    /// and nobody can change their own.
    pub async fn update_role(
        pool: &PgPool,
        actor: &User,
        user_id: &Uuid,
        role: UserRole,
    ) -> AppResult<User> {
        if actor.role != UserRole::SuperAdmin {
            return Err(AppError::Forbidden(
                "Only super admins can change roles".to_string(),
            ));
        }

        if actor.id == *user_id {
            return Err(AppError::Forbidden("Cannot change your own role".to_string()));
        }

        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let updated = UserRepository::update_role(pool, &user.id, role).await?;

        AuditRepository::create(
            pool,
            Some(&actor.id),
            "role_changed",
            "user",
            Some(user_id),
            Some(serde_json::json!({
                "from": user.role.to_string(),
                "to": role.to_string(),
            })),
        )
        .await?;

        Ok(updated)
    }

    /// Delete a user account. Super admin only, and never your own;
    /// participations and payments go with the account via FK cascade.
    pub async fn delete_user(pool: &PgPool, actor: &User, user_id: &Uuid) -> AppResult<()> {
        if actor.role != UserRole::SuperAdmin {
            return Err(AppError::Forbidden(
                "Only super admins can delete users".to_string(),
            ));
        }

        if actor.id == *user_id {
            return Err(AppError::Forbidden("Cannot delete your own account".to_string()));
        }

        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        UserRepository::delete(pool, &user.id).await?;

        AuditRepository::create(
            pool,
            Some(&actor.id),
            "user_deleted",
            "user",
            Some(user_id),
            Some(serde_json::json!({ "email": user.email })),
        )
        .await?;

        Ok(())
    }

    /// Get a site setting
    pub async fn get_setting(pool: &PgPool, key: &str) -> AppResult<Setting> {
        SettingsRepository::get(pool, key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Setting '{}' not found", key)))
    }

    /// Create or update a site setting
    pub async fn upsert_setting(
        pool: &PgPool,
        admin_id: &Uuid,
        key: &str,
        value: &str,
    ) -> AppResult<Setting> {
        let setting = SettingsRepository::upsert(pool, key, value).await?;

        AuditRepository::create(
            pool,
            Some(admin_id),
            "setting_updated",
            "setting",
            None,
            Some(serde_json::json!({ "key": key })),
        )
        .await?;

        Ok(setting)
    }

    /// List all site settings
    pub async fn list_settings(pool: &PgPool) -> AppResult<Vec<Setting>> {
        SettingsRepository::list(pool).await
    }

    /// Recent audit log entries
    pub async fn audit_log(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AuditLog>, i64)> {
        AuditRepository::list_recent(pool, offset, limit).await
    }
}
