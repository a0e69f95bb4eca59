//! Participant repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        GameMode, Participant, ParticipantStatus, TournamentStatus,
    },
};

/// A participation row joined with its tournament, as returned by the
/// per-user tournament listing
#[derive(Debug, Clone, FromRow)]
pub struct ParticipationWithTournament {
    pub participant_id: Uuid,
    pub participant_status: ParticipantStatus,
    pub joined_at: DateTime<Utc>,
    pub tournament_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub game: String,
    pub game_mode: GameMode,
    pub start_time: DateTime<Utc>,
    pub entry_fee: i64,
    pub prize_1: Option<i64>,
    pub prize_2: Option<i64>,
    pub prize_3: Option<i64>,
    pub room_id: Option<String>,
    pub room_password: Option<String>,
    pub party_code: Option<String>,
    pub status: TournamentStatus,
}

/// Repository for participant database operations
pub struct ParticipantRepository;

impl ParticipantRepository {
    /// Insert a pending_payment participation.
    ///
    /// The partial unique index on (user_id, tournament_id) over non-rejected
    /// rows makes this a no-op when an active participation already exists;
    /// None signals the caller that nothing was inserted.
    pub async fn try_insert(
        pool: &PgPool,
        user_id: &Uuid,
        tournament_id: &Uuid,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (user_id, tournament_id, status)
            VALUES ($1, $2, 'pending_payment')
            ON CONFLICT (user_id, tournament_id) WHERE status <> 'rejected' DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(tournament_id)
        .fetch_optional(pool)
        .await?;

        Ok(participant)
    }

    /// Find participant by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Participant>> {
        let participant =
            sqlx::query_as::<_, Participant>(r#"SELECT * FROM participants WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(participant)
    }

    /// Find the user's live (non-rejected) participation in a tournament
    pub async fn find_active(
        pool: &PgPool,
        user_id: &Uuid,
        tournament_id: &Uuid,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT * FROM participants
            WHERE user_id = $1 AND tournament_id = $2 AND status <> 'rejected'
            "#,
        )
        .bind(user_id)
        .bind(tournament_id)
        .fetch_optional(pool)
        .await?;

        Ok(participant)
    }

    /// Move a pending_payment participation to pending_verify and attach its
    /// payment, inside the caller's transaction
    pub async fn attach_payment(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: &Uuid,
        payment_id: &Uuid,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET status = 'pending_verify', payment_id = $2
            WHERE id = $1 AND status = 'pending_payment'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(participant)
    }

    /// Resolve the pending_verify participation attached to a payment,
    /// inside the caller's transaction
    pub async fn resolve_by_payment_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        payment_id: &Uuid,
        to: ParticipantStatus,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET status = $2
            WHERE payment_id = $1 AND status = 'pending_verify'
            RETURNING *
            "#,
        )
        .bind(payment_id)
        .bind(to)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(participant)
    }

    /// Count non-rejected participants of a tournament.
    ///
    /// This is the figure checked against max_participants; rejected rows
    /// free their slot.
    pub async fn count_active(pool: &PgPool, tournament_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM participants
            WHERE tournament_id = $1 AND status <> 'rejected'
            "#,
        )
        .bind(tournament_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count approved participants of a tournament
    pub async fn count_approved(pool: &PgPool, tournament_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM participants
            WHERE tournament_id = $1 AND status = 'approved'
            "#,
        )
        .bind(tournament_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// All of a user's participations joined with their tournaments
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Uuid,
    ) -> AppResult<Vec<ParticipationWithTournament>> {
        let rows = sqlx::query_as::<_, ParticipationWithTournament>(
            r#"
            SELECT
                p.id AS participant_id,
                p.status AS participant_status,
                p.created_at AS joined_at,
                t.id AS tournament_id,
                t.name, t.description, t.game, t.game_mode, t.start_time,
                t.entry_fee, t.prize_1, t.prize_2, t.prize_3,
                t.room_id, t.room_password, t.party_code,
                t.status
            FROM participants p
            JOIN tournaments t ON t.id = p.tournament_id
            WHERE p.user_id = $1
            ORDER BY t.start_time ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Approved participants of a tournament with their contact details
    pub async fn list_approved_with_users(
        pool: &PgPool,
        tournament_id: &Uuid,
    ) -> AppResult<Vec<ApprovedParticipant>> {
        let rows = sqlx::query_as::<_, ApprovedParticipant>(
            r#"
            SELECT p.id AS participant_id, p.user_id, u.name, u.email
            FROM participants p
            JOIN users u ON u.id = p.user_id
            WHERE p.tournament_id = $1 AND p.status = 'approved'
            ORDER BY p.created_at ASC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

/// An approved participant with notification contact details
#[derive(Debug, Clone, FromRow)]
pub struct ApprovedParticipant {
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}
