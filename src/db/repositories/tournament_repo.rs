//! Tournament repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{GameMode, Tournament, TournamentStatus},
};

/// Repository for tournament database operations
pub struct TournamentRepository;

impl TournamentRepository {
    /// Create a new tournament in draft state
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
        game: &str,
        game_mode: GameMode,
        start_time: DateTime<Utc>,
        entry_fee: i64,
        prize_1: Option<i64>,
        prize_2: Option<i64>,
        prize_3: Option<i64>,
        max_participants: Option<i32>,
        created_by: &Uuid,
    ) -> AppResult<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            INSERT INTO tournaments (
                name, description, game, game_mode, start_time, entry_fee,
                prize_1, prize_2, prize_3, max_participants, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(game)
        .bind(game_mode)
        .bind(start_time)
        .bind(entry_fee)
        .bind(prize_1)
        .bind(prize_2)
        .bind(prize_3)
        .bind(max_participants)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(tournament)
    }

    /// Find tournament by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Tournament>> {
        let tournament =
            sqlx::query_as::<_, Tournament>(r#"SELECT * FROM tournaments WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(tournament)
    }

    /// Update tournament fields (partial update)
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        name: Option<&str>,
        description: Option<&str>,
        game: Option<&str>,
        game_mode: Option<GameMode>,
        start_time: Option<DateTime<Utc>>,
        entry_fee: Option<i64>,
        prize_1: Option<i64>,
        prize_2: Option<i64>,
        prize_3: Option<i64>,
        room_id: Option<&str>,
        room_password: Option<&str>,
        party_code: Option<&str>,
        max_participants: Option<i32>,
    ) -> AppResult<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                game = COALESCE($4, game),
                game_mode = COALESCE($5, game_mode),
                start_time = COALESCE($6, start_time),
                entry_fee = COALESCE($7, entry_fee),
                prize_1 = COALESCE($8, prize_1),
                prize_2 = COALESCE($9, prize_2),
                prize_3 = COALESCE($10, prize_3),
                room_id = COALESCE($11, room_id),
                room_password = COALESCE($12, room_password),
                party_code = COALESCE($13, party_code),
                max_participants = COALESCE($14, max_participants),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(game)
        .bind(game_mode)
        .bind(start_time)
        .bind(entry_fee)
        .bind(prize_1)
        .bind(prize_2)
        .bind(prize_3)
        .bind(room_id)
        .bind(room_password)
        .bind(party_code)
        .bind(max_participants)
        .fetch_one(pool)
        .await?;

        Ok(tournament)
    }

    /// Compare-and-set status transition.
    ///
    /// Returns the updated row only if the tournament was still in `from`
    /// when the update ran; a concurrent transition makes this return None.
    pub async fn update_status_if(
        pool: &PgPool,
        id: &Uuid,
        from: TournamentStatus,
        to: TournamentStatus,
    ) -> AppResult<Option<Tournament>> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(pool)
        .await?;

        Ok(tournament)
    }

    /// Delete tournament
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM tournaments WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// List tournaments with pagination and optional status filter.
    ///
    /// Public listings pass the visible statuses; admin listings pass None
    /// to see everything including drafts.
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        statuses: Option<&[TournamentStatus]>,
    ) -> AppResult<(Vec<Tournament>, i64)> {
        let tournaments = sqlx::query_as::<_, Tournament>(
            r#"
            SELECT * FROM tournaments
            WHERE ($1::tournament_status[] IS NULL OR status = ANY($1))
            ORDER BY start_time ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(statuses)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM tournaments
            WHERE ($1::tournament_status[] IS NULL OR status = ANY($1))
            "#,
        )
        .bind(statuses)
        .fetch_one(pool)
        .await?;

        Ok((tournaments, count))
    }

    /// Tournaments whose start falls inside (now, now + lookahead_minutes],
    /// restricted to statuses eligible for reminders
    pub async fn find_upcoming(
        pool: &PgPool,
        now: DateTime<Utc>,
        lookahead_minutes: i64,
    ) -> AppResult<Vec<Tournament>> {
        let tournaments = sqlx::query_as::<_, Tournament>(
            r#"
            SELECT * FROM tournaments
            WHERE status IN ('published', 'live')
              AND start_time > $1
              AND start_time <= $1 + make_interval(mins => $2::int)
            ORDER BY start_time ASC
            "#,
        )
        .bind(now)
        .bind(lookahead_minutes as i32)
        .fetch_all(pool)
        .await?;

        Ok(tournaments)
    }

    /// Count total tournaments
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM tournaments"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
