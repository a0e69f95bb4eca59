//! Site settings repository

use sqlx::PgPool;

use crate::{error::AppResult, models::Setting};

/// Repository for key/value site settings
pub struct SettingsRepository;

impl SettingsRepository {
    /// Get a setting by key
    pub async fn get(pool: &PgPool, key: &str) -> AppResult<Option<Setting>> {
        let setting = sqlx::query_as::<_, Setting>(r#"SELECT * FROM settings WHERE key = $1"#)
            .bind(key)
            .fetch_optional(pool)
            .await?;

        Ok(setting)
    }

    /// Create or update a setting
    pub async fn upsert(pool: &PgPool, key: &str, value: &str) -> AppResult<Setting> {
        let setting = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(pool)
        .await?;

        Ok(setting)
    }

    /// All settings, sorted by key
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Setting>> {
        let settings = sqlx::query_as::<_, Setting>(r#"SELECT * FROM settings ORDER BY key"#)
            .fetch_all(pool)
            .await?;

        Ok(settings)
    }
}
