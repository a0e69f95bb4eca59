//! Reminder service
//!
//! Evaluates which reminder milestones are due and sends each one exactly
//! once per approved participant. The claim row is inserted before the
//! notification goes out, so two overlapping ticks (or a scheduler tick
//! racing the admin trigger) never double-send.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::REMINDER_LOOKAHEAD_MINUTES,
    db::repositories::{
        ApprovedParticipant, ParticipantRepository, ReminderRepository, TournamentRepository,
    },
    error::AppResult,
    models::{Milestone, ParticipantStatus, Tournament},
    services::{
        disclosure::{self, DisclosureCheck},
        notification_service::{Notification, NotificationKind, Notifier},
    },
};

/// Outcome of one reminder evaluation pass
#[derive(Debug, Default, Clone, Copy)]
pub struct TickSummary {
    /// Tournaments with at least one due milestone
    pub tournaments: usize,
    /// Notifications sent this pass
    pub sent: usize,
    /// (participant, milestone) pairs already claimed by an earlier pass
    pub already_sent: usize,
    /// Deliveries that failed after the claim was taken
    pub failed: usize,
}

/// Reminder service
pub struct ReminderService;

impl ReminderService {
    /// Run one evaluation pass at `now`.
    ///
    /// A delayed pass fires every milestone whose boundary has elapsed, so
    /// a participant approved at T-7 minutes still receives m30, m20 and m5
    /// on the next pass. Milestones stop firing once the tournament starts.
    pub async fn run_tick(
        pool: &PgPool,
        notifier: &dyn Notifier,
        now: DateTime<Utc>,
    ) -> AppResult<TickSummary> {
        let mut summary = TickSummary::default();

        let tournaments =
            TournamentRepository::find_upcoming(pool, now, REMINDER_LOOKAHEAD_MINUTES).await?;

        for tournament in tournaments {
            let due = Milestone::due(tournament.start_time, now);
            if due.is_empty() {
                continue;
            }
            summary.tournaments += 1;

            let participants =
                ParticipantRepository::list_approved_with_users(pool, &tournament.id).await?;

            for participant in &participants {
                for &milestone in &due {
                    Self::send_one(
                        pool,
                        notifier,
                        &tournament,
                        participant,
                        milestone,
                        now,
                        &mut summary,
                    )
                    .await?;
                }
            }
        }

        if summary.sent > 0 || summary.failed > 0 {
            tracing::info!(
                tournaments = summary.tournaments,
                sent = summary.sent,
                already_sent = summary.already_sent,
                failed = summary.failed,
                "Reminder pass complete"
            );
        }

        Ok(summary)
    }

    async fn send_one(
        pool: &PgPool,
        notifier: &dyn Notifier,
        tournament: &Tournament,
        participant: &ApprovedParticipant,
        milestone: Milestone,
        now: DateTime<Utc>,
        summary: &mut TickSummary,
    ) -> AppResult<()> {
        let claimed = ReminderRepository::try_claim(
            pool,
            &participant.participant_id,
            &tournament.id,
            milestone,
        )
        .await?;

        if !claimed {
            summary.already_sent += 1;
            return Ok(());
        }

        let notification = Notification {
            recipient_email: participant.email.clone(),
            recipient_name: participant.name.clone(),
            kind: NotificationKind::Reminder(milestone),
            tournament_id: tournament.id,
            tournament_name: tournament.name.clone(),
            body: Self::reminder_body(tournament, milestone, now),
        };

        match notifier.send(&notification).await {
            Ok(()) => summary.sent += 1,
            Err(e) => {
                // Claim stays taken: a failed delivery is dropped, never
                // retried into a duplicate
                summary.failed += 1;
                tracing::error!(
                    participant_id = %participant.participant_id,
                    tournament_id = %tournament.id,
                    milestone = %milestone,
                    error = %e,
                    "Reminder delivery failed"
                );
            }
        }

        Ok(())
    }

    /// Reminder text; the final milestone carries the match credentials
    /// whenever the disclosure gate is open for the recipient
    fn reminder_body(tournament: &Tournament, milestone: Milestone, now: DateTime<Utc>) -> String {
        let mut body = format!(
            "'{}' starts in {} minutes ({}).",
            tournament.name,
            milestone.minutes(),
            tournament.start_time.to_rfc3339(),
        );

        if milestone == Milestone::M5 {
            // Recipients come from the approved list, so the gate decision
            // reduces to the tournament state and the time window
            let check = DisclosureCheck {
                participant_status: ParticipantStatus::Approved,
                tournament_status: tournament.status,
                start_time: tournament.start_time,
                has_secrets: tournament.has_secrets(),
            };
            if let Some(secrets) = disclosure::reveal(
                &check,
                tournament.room_id.as_deref(),
                tournament.room_password.as_deref(),
                tournament.party_code.as_deref(),
                now,
            ) {
                body.push_str(&format!(
                    " Room ID: {}, Password: {}, Party code: {}",
                    secrets.room_id, secrets.room_password, secrets.party_code
                ));
            }
        }

        body
    }

    /// Count reminders recorded for a tournament (admin stats)
    pub async fn count_for_tournament(pool: &PgPool, tournament_id: &Uuid) -> AppResult<i64> {
        ReminderRepository::count_for_tournament(pool, tournament_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::ReminderRepository;
    use crate::models::{GameMode, TournamentStatus};
    use crate::test_utils::{self, seed, RecordingNotifier};
    use chrono::{Duration, TimeZone};

    fn tournament(with_secrets: bool) -> Tournament {
        Tournament {
            id: Uuid::new_v4(),
            name: "Friday Night Cup".to_string(),
            description: None,
            game: "Free Fire".to_string(),
            game_mode: GameMode::Squad,
            start_time: Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap(),
            entry_fee: 5000,
            prize_1: Some(100_000),
            prize_2: None,
            prize_3: None,
            room_id: with_secrets.then(|| "room-42".to_string()),
            room_password: with_secrets.then(|| "hunter2".to_string()),
            party_code: with_secrets.then(|| "FF-99".to_string()),
            max_participants: Some(48),
            status: TournamentStatus::Published,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_final_reminder_includes_credentials() {
        let t = tournament(true);
        let now = t.start_time - Duration::minutes(4);
        let body = ReminderService::reminder_body(&t, Milestone::M5, now);
        assert!(body.contains("room-42"));
        assert!(body.contains("hunter2"));
        assert!(body.contains("FF-99"));
    }

    #[test]
    fn test_early_reminders_never_include_credentials() {
        let t = tournament(true);
        for milestone in [Milestone::M30, Milestone::M20] {
            let now = t.start_time - Duration::minutes(milestone.minutes());
            let body = ReminderService::reminder_body(&t, milestone, now);
            assert!(!body.contains("room-42"));
            assert!(!body.contains("hunter2"));
        }
    }

    #[test]
    fn test_final_reminder_without_secrets_omits_credentials() {
        let t = tournament(false);
        let now = t.start_time - Duration::minutes(4);
        let body = ReminderService::reminder_body(&t, Milestone::M5, now);
        assert!(!body.contains("Room ID"));
    }

    #[tokio::test]
    async fn test_repeated_ticks_deliver_each_milestone_once() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;
        let user = seed::adult_user(&pool).await;
        let start = Utc::now() + Duration::minutes(25);
        let tournament = seed::published_tournament(&pool, &admin.id, start, 5000).await;
        seed::approved_participant(&pool, &user, &admin, &tournament).await;

        let notifier = RecordingNotifier::new();
        ReminderService::run_tick(&pool, &notifier, Utc::now())
            .await
            .unwrap();
        ReminderService::run_tick(&pool, &notifier, Utc::now())
            .await
            .unwrap();

        // The m30 boundary was elapsed on both ticks; one delivery
        let delivered = notifier.sent_for(&tournament.id);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].kind, NotificationKind::Reminder(Milestone::M30));
        assert_eq!(
            ReminderRepository::count_for_tournament(&pool, &tournament.id)
                .await
                .unwrap(),
            1
        );
    }
}
