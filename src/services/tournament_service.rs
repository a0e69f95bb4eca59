//! Tournament lifecycle service

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{
        AuditRepository, ParticipantRepository, TournamentRepository,
    },
    error::{AppError, AppResult},
    models::{GameMode, Tournament, TournamentStatus},
    services::notification_service::{Notification, NotificationKind, Notifier},
};

/// Fields accepted when creating a tournament
#[derive(Debug, Clone)]
pub struct NewTournament {
    pub name: String,
    pub description: Option<String>,
    pub game: String,
    pub game_mode: GameMode,
    pub start_time: DateTime<Utc>,
    pub entry_fee: i64,
    pub prize_1: Option<i64>,
    pub prize_2: Option<i64>,
    pub prize_3: Option<i64>,
    pub max_participants: Option<i32>,
}

/// Fields accepted when updating a tournament
#[derive(Debug, Clone, Default)]
pub struct TournamentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub game: Option<String>,
    pub game_mode: Option<GameMode>,
    pub start_time: Option<DateTime<Utc>>,
    pub entry_fee: Option<i64>,
    pub prize_1: Option<i64>,
    pub prize_2: Option<i64>,
    pub prize_3: Option<i64>,
    pub room_id: Option<String>,
    pub room_password: Option<String>,
    pub party_code: Option<String>,
    pub max_participants: Option<i32>,
}

/// Tournament service
pub struct TournamentService;

impl TournamentService {
    /// Create a tournament in draft state
    pub async fn create(
        pool: &PgPool,
        admin_id: &Uuid,
        new: NewTournament,
    ) -> AppResult<Tournament> {
        if new.entry_fee < 0 {
            return Err(AppError::Validation("Entry fee cannot be negative".to_string()));
        }

        let tournament = TournamentRepository::create(
            pool,
            &new.name,
            new.description.as_deref(),
            &new.game,
            new.game_mode,
            new.start_time,
            new.entry_fee,
            new.prize_1,
            new.prize_2,
            new.prize_3,
            new.max_participants,
            admin_id,
        )
        .await?;

        AuditRepository::create(
            pool,
            Some(admin_id),
            "tournament_created",
            "tournament",
            Some(&tournament.id),
            Some(serde_json::json!({ "name": tournament.name })),
        )
        .await?;

        tracing::info!(tournament_id = %tournament.id, name = %tournament.name, "Tournament created");

        Ok(tournament)
    }

    /// Get tournament by ID
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<Tournament> {
        TournamentRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))
    }

    /// List tournaments visible to the public (everything except drafts).
    ///
    /// A requested status filter is intersected with the visible set, so
    /// asking for drafts returns nothing rather than leaking them.
    pub async fn list_public(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        status: Option<TournamentStatus>,
    ) -> AppResult<(Vec<Tournament>, i64)> {
        const VISIBLE: [TournamentStatus; 3] = [
            TournamentStatus::Published,
            TournamentStatus::Live,
            TournamentStatus::Finished,
        ];

        let filter: Vec<TournamentStatus> = match status {
            Some(s) if VISIBLE.contains(&s) => vec![s],
            Some(_) => return Ok((Vec::new(), 0)),
            None => VISIBLE.to_vec(),
        };

        TournamentRepository::list(pool, offset, limit, Some(filter.as_slice())).await
    }

    /// List all tournaments including drafts (admin view)
    pub async fn list_all(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        status: Option<TournamentStatus>,
    ) -> AppResult<(Vec<Tournament>, i64)> {
        let filter = status.map(|s| vec![s]);
        TournamentRepository::list(pool, offset, limit, filter.as_deref()).await
    }

    /// Update tournament fields, including the secret match credentials
    pub async fn update(
        pool: &PgPool,
        admin_id: &Uuid,
        id: &Uuid,
        update: TournamentUpdate,
    ) -> AppResult<Tournament> {
        // Ensure the row exists first so a bad ID surfaces as 404, not 500
        Self::get(pool, id).await?;

        let tournament = TournamentRepository::update(
            pool,
            id,
            update.name.as_deref(),
            update.description.as_deref(),
            update.game.as_deref(),
            update.game_mode,
            update.start_time,
            update.entry_fee,
            update.prize_1,
            update.prize_2,
            update.prize_3,
            update.room_id.as_deref(),
            update.room_password.as_deref(),
            update.party_code.as_deref(),
            update.max_participants,
        )
        .await?;

        AuditRepository::create(
            pool,
            Some(admin_id),
            "tournament_updated",
            "tournament",
            Some(id),
            None,
        )
        .await?;

        Ok(tournament)
    }

    /// Transition tournament status along the lifecycle.
    ///
    /// The transition table is validated first, then applied with a
    /// compare-and-set so a concurrent admin cannot double-apply.
    /// Cancellation notifies all approved participants.
    pub async fn transition(
        pool: &PgPool,
        notifier: &dyn Notifier,
        admin_id: &Uuid,
        id: &Uuid,
        to: TournamentStatus,
    ) -> AppResult<Tournament> {
        let current = Self::get(pool, id).await?;

        if !current.status.can_transition_to(to) {
            return Err(AppError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        let updated = TournamentRepository::update_status_if(pool, id, current.status, to)
            .await?
            .ok_or(AppError::Conflict(
                "Tournament status changed concurrently, retry".to_string(),
            ))?;

        AuditRepository::create(
            pool,
            Some(admin_id),
            "tournament_status_changed",
            "tournament",
            Some(id),
            Some(serde_json::json!({
                "from": current.status.to_string(),
                "to": to.to_string(),
            })),
        )
        .await?;

        tracing::info!(
            tournament_id = %id,
            from = %current.status,
            to = %to,
            "Tournament status changed"
        );

        if to == TournamentStatus::Cancelled {
            Self::notify_cancellation(pool, notifier, &updated).await;
        }

        Ok(updated)
    }

    /// Delete a tournament.
    ///
    /// Refused while approved participants exist; their entry fees have
    /// been collected and the record must survive until they are resolved
    /// through cancellation.
    pub async fn delete(pool: &PgPool, admin_id: &Uuid, id: &Uuid) -> AppResult<()> {
        Self::get(pool, id).await?;

        let approved = ParticipantRepository::count_approved(pool, id).await?;
        if approved > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete tournament with {} approved participants; cancel it instead",
                approved
            )));
        }

        TournamentRepository::delete(pool, id).await?;

        AuditRepository::create(
            pool,
            Some(admin_id),
            "tournament_deleted",
            "tournament",
            Some(id),
            None,
        )
        .await?;

        Ok(())
    }

    /// Best-effort cancellation notices; delivery failures are logged,
    /// never bubbled into the admin's request
    async fn notify_cancellation(pool: &PgPool, notifier: &dyn Notifier, tournament: &Tournament) {
        let participants =
            match ParticipantRepository::list_approved_with_users(pool, &tournament.id).await {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!(
                        tournament_id = %tournament.id,
                        error = %e,
                        "Failed to load participants for cancellation notice"
                    );
                    return;
                }
            };

        for participant in participants {
            let notification = Notification {
                recipient_email: participant.email,
                recipient_name: participant.name,
                kind: NotificationKind::TournamentCancelled,
                tournament_id: tournament.id,
                tournament_name: tournament.name.clone(),
                body: format!(
                    "Tournament '{}' has been cancelled. Your entry fee will be refunded.",
                    tournament.name
                ),
            };

            if let Err(e) = notifier.send(&notification).await {
                tracing::error!(
                    tournament_id = %tournament.id,
                    user_id = %participant.user_id,
                    error = %e,
                    "Failed to send cancellation notice"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notification_service::LogNotifier;
    use crate::test_utils::{self, seed};
    use chrono::Duration;

    fn new_tournament() -> NewTournament {
        NewTournament {
            name: format!("Test Cup {}", Uuid::new_v4()),
            description: None,
            game: "Free Fire".to_string(),
            game_mode: GameMode::Solo,
            start_time: Utc::now() + Duration::hours(6),
            entry_fee: 5000,
            prize_1: Some(100_000),
            prize_2: None,
            prize_3: None,
            max_participants: None,
        }
    }

    #[tokio::test]
    async fn test_transition_follows_the_lifecycle_table() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;

        let tournament = TournamentService::create(&pool, &admin.id, new_tournament())
            .await
            .unwrap();
        assert_eq!(tournament.status, TournamentStatus::Draft);

        // Drafts cannot skip straight to live
        let skipped = TournamentService::transition(
            &pool,
            &LogNotifier,
            &admin.id,
            &tournament.id,
            TournamentStatus::Live,
        )
        .await;
        assert!(matches!(skipped, Err(AppError::InvalidTransition { .. })));

        let published = TournamentService::transition(
            &pool,
            &LogNotifier,
            &admin.id,
            &tournament.id,
            TournamentStatus::Published,
        )
        .await
        .unwrap();
        assert_eq!(published.status, TournamentStatus::Published);
    }

    #[tokio::test]
    async fn test_stale_status_writer_loses_the_race() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;

        let tournament = TournamentService::create(&pool, &admin.id, new_tournament())
            .await
            .unwrap();
        TournamentService::transition(
            &pool,
            &LogNotifier,
            &admin.id,
            &tournament.id,
            TournamentStatus::Published,
        )
        .await
        .unwrap();

        // A writer still holding the draft view cannot apply its update
        let stale = TournamentRepository::update_status_if(
            &pool,
            &tournament.id,
            TournamentStatus::Draft,
            TournamentStatus::Cancelled,
        )
        .await
        .unwrap();
        assert!(stale.is_none());

        let current = TournamentService::get(&pool, &tournament.id).await.unwrap();
        assert_eq!(current.status, TournamentStatus::Published);
    }
}
