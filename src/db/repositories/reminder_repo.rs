//! Reminder repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Milestone};

/// Repository for reminder database operations
pub struct ReminderRepository;

impl ReminderRepository {
    /// Claim a (participant, milestone) pair.
    ///
    /// Returns true when this call inserted the row, false when another
    /// tick (or process) already claimed it. The claim happens before the
    /// notification is sent, so a crash between claim and send drops the
    /// reminder rather than duplicating it.
    pub async fn try_claim(
        pool: &PgPool,
        participant_id: &Uuid,
        tournament_id: &Uuid,
        milestone: Milestone,
    ) -> AppResult<bool> {
        let claimed = sqlx::query(
            r#"
            INSERT INTO reminders (participant_id, tournament_id, milestone)
            VALUES ($1, $2, $3)
            ON CONFLICT (participant_id, milestone) DO NOTHING
            "#,
        )
        .bind(participant_id)
        .bind(tournament_id)
        .bind(milestone)
        .execute(pool)
        .await?
        .rows_affected()
            > 0;

        Ok(claimed)
    }

    /// Count reminders sent for a tournament
    pub async fn count_for_tournament(pool: &PgPool, tournament_id: &Uuid) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM reminders WHERE tournament_id = $1"#)
                .bind(tournament_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
