//! Participation workflow service
//!
//! Drives the join, payment submission and payment verification steps.
//! Every step that moves money or state uses a compare-and-set guard or a
//! transaction, so concurrent submissions and double-clicking admins
//! resolve to exactly one winner.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::MIN_PARTICIPANT_AGE,
    db::repositories::{
        AuditRepository, ParticipantRepository, ParticipationWithTournament, PaymentRepository,
        TournamentRepository,
    },
    error::{AppError, AppResult},
    models::{
        Participant, ParticipantStatus, Payment, PaymentMethod, PaymentStatus, User,
    },
    services::{
        disclosure::{self, DisclosureCheck, SecretInfo},
        notification_service::{Notification, NotificationKind, Notifier},
    },
    utils::time::age_in_years,
};

/// Fields accepted when submitting a payment
#[derive(Debug, Clone)]
pub struct PaymentSubmission {
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payer_number: String,
    pub txn_id: String,
}

/// Participation service
pub struct ParticipationService;

impl ParticipationService {
    /// Join a tournament, creating a pending_payment participation.
    ///
    /// Requires a verified age of at least MIN_PARTICIPANT_AGE, an open
    /// tournament, and a free slot. Joining is a safe retry: when a
    /// non-rejected participation is already on file it is returned as-is,
    /// and a rejected one does not block a fresh join.
    pub async fn join(
        pool: &PgPool,
        user: &User,
        tournament_id: &Uuid,
    ) -> AppResult<Participant> {
        Self::check_age(user)?;

        let tournament = TournamentRepository::find_by_id(pool, tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        if !tournament.is_joinable() {
            return Err(AppError::TournamentNotJoinable);
        }

        if let Some(max) = tournament.max_participants {
            let active = ParticipantRepository::count_active(pool, tournament_id).await?;
            if active >= max as i64 {
                return Err(AppError::TournamentFull);
            }
        }

        let participant = match ParticipantRepository::try_insert(pool, &user.id, tournament_id)
            .await?
        {
            Some(participant) => participant,
            // The insert was a no-op against an existing active row;
            // return that row instead of failing the retry
            None => {
                return ParticipantRepository::find_active(pool, &user.id, tournament_id)
                    .await?
                    .ok_or(AppError::Conflict(
                        "Participation changed concurrently, retry".to_string(),
                    ));
            }
        };

        AuditRepository::create(
            pool,
            Some(&user.id),
            "tournament_joined",
            "participant",
            Some(&participant.id),
            Some(serde_json::json!({ "tournament_id": tournament_id })),
        )
        .await?;

        tracing::info!(
            user_id = %user.id,
            tournament_id = %tournament_id,
            "User joined tournament"
        );

        Ok(participant)
    }

    /// Submit payment details for a pending join.
    ///
    /// The amount must equal the tournament entry fee exactly, in minor
    /// currency units. Payment creation and the participation's move to
    /// pending_verify commit together.
    pub async fn submit_payment(
        pool: &PgPool,
        user: &User,
        tournament_id: &Uuid,
        submission: PaymentSubmission,
    ) -> AppResult<Payment> {
        let tournament = TournamentRepository::find_by_id(pool, tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;

        let participant = ParticipantRepository::find_active(pool, &user.id, tournament_id)
            .await?
            .ok_or(AppError::NoPendingJoin)?;

        match participant.status {
            ParticipantStatus::PendingPayment => {}
            ParticipantStatus::PendingVerify => {
                return Err(AppError::Conflict(
                    "Payment already submitted and awaiting verification".to_string(),
                ));
            }
            ParticipantStatus::Approved => {
                return Err(AppError::Conflict(
                    "Participation is already approved".to_string(),
                ));
            }
            ParticipantStatus::Rejected => return Err(AppError::NoPendingJoin),
        }

        if submission.amount != tournament.entry_fee {
            return Err(AppError::Validation(format!(
                "Payment amount {} does not match entry fee {}",
                submission.amount, tournament.entry_fee
            )));
        }

        let mut tx = pool.begin().await?;

        let payment = PaymentRepository::create(
            &mut tx,
            &user.id,
            tournament_id,
            submission.amount,
            submission.payment_method,
            &submission.payer_number,
            &submission.txn_id,
        )
        .await?;

        ParticipantRepository::attach_payment(&mut tx, &participant.id, &payment.id)
            .await?
            .ok_or(AppError::Conflict(
                "Participation state changed concurrently, retry".to_string(),
            ))?;

        AuditRepository::create_in_tx(
            &mut tx,
            Some(&user.id),
            "payment_submitted",
            "payment",
            Some(&payment.id),
            Some(serde_json::json!({
                "tournament_id": tournament_id,
                "amount": submission.amount,
                "method": submission.payment_method.to_string(),
            })),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %user.id,
            tournament_id = %tournament_id,
            payment_id = %payment.id,
            "Payment submitted for verification"
        );

        Ok(payment)
    }

    /// Approve or reject a pending payment.
    ///
    /// The payment resolution and the participation's terminal status
    /// commit in one transaction; the pending-only guard makes concurrent
    /// resolutions race to a single winner, the loser sees AlreadyResolved.
    pub async fn resolve_payment(
        pool: &PgPool,
        notifier: &dyn Notifier,
        admin_id: &Uuid,
        payment_id: &Uuid,
        approve: bool,
    ) -> AppResult<Payment> {
        let (payment_status, participant_status, action) = if approve {
            (PaymentStatus::Approved, ParticipantStatus::Approved, "payment_approved")
        } else {
            (PaymentStatus::Rejected, ParticipantStatus::Rejected, "payment_rejected")
        };

        let mut tx = pool.begin().await?;

        let payment =
            PaymentRepository::resolve_if_pending(&mut tx, payment_id, payment_status, admin_id)
                .await?
                .ok_or(AppError::AlreadyResolved)?;

        ParticipantRepository::resolve_by_payment_tx(&mut tx, payment_id, participant_status)
            .await?
            .ok_or(AppError::Conflict(
                "No pending_verify participation attached to this payment".to_string(),
            ))?;

        AuditRepository::create_in_tx(
            &mut tx,
            Some(admin_id),
            action,
            "payment",
            Some(payment_id),
            Some(serde_json::json!({
                "user_id": payment.user_id,
                "tournament_id": payment.tournament_id,
            })),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            payment_id = %payment_id,
            approved = approve,
            admin_id = %admin_id,
            "Payment resolved"
        );

        Self::notify_resolution(pool, notifier, &payment, approve).await;

        Ok(payment)
    }

    /// The user's tournaments with secrets passed through the disclosure
    /// gate; `now` is injected so the window boundary is testable
    pub async fn list_user_tournaments(
        pool: &PgPool,
        user_id: &Uuid,
        now: chrono::DateTime<Utc>,
    ) -> AppResult<Vec<(ParticipationWithTournament, Option<SecretInfo>)>> {
        let rows = ParticipantRepository::list_for_user(pool, user_id).await?;

        let result = rows
            .into_iter()
            .map(|row| {
                let check = DisclosureCheck {
                    participant_status: row.participant_status,
                    tournament_status: row.status,
                    start_time: row.start_time,
                    has_secrets: row.room_id.is_some()
                        && row.room_password.is_some()
                        && row.party_code.is_some(),
                };
                let secrets = disclosure::reveal(
                    &check,
                    row.room_id.as_deref(),
                    row.room_password.as_deref(),
                    row.party_code.as_deref(),
                    now,
                );
                (row, secrets)
            })
            .collect();

        Ok(result)
    }

    /// Pending payments queue for admin review
    pub async fn list_pending_payments(
        pool: &PgPool,
    ) -> AppResult<Vec<crate::db::repositories::PendingPayment>> {
        PaymentRepository::list_pending(pool).await
    }

    fn check_age(user: &User) -> AppResult<()> {
        if !user.is_age_verified {
            return Err(AppError::AgeVerificationRequired);
        }

        let dob = user.date_of_birth.ok_or(AppError::AgeVerificationRequired)?;
        if age_in_years(dob, Utc::now().date_naive()) < MIN_PARTICIPANT_AGE {
            return Err(AppError::AgeVerificationRequired);
        }

        Ok(())
    }

    /// Best-effort outcome notice to the payer
    async fn notify_resolution(
        pool: &PgPool,
        notifier: &dyn Notifier,
        payment: &Payment,
        approved: bool,
    ) {
        let context = async {
            let user = crate::db::repositories::UserRepository::find_by_id(pool, &payment.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
            let tournament =
                TournamentRepository::find_by_id(pool, &payment.tournament_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))?;
            Ok::<_, AppError>((user, tournament))
        };

        let (user, tournament) = match context.await {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::error!(
                    payment_id = %payment.id,
                    error = %e,
                    "Failed to load context for payment notice"
                );
                return;
            }
        };

        let (kind, body) = if approved {
            (
                NotificationKind::PaymentApproved,
                format!(
                    "Your payment for '{}' was verified. You are registered; match credentials unlock 5 minutes before start.",
                    tournament.name
                ),
            )
        } else {
            (
                NotificationKind::PaymentRejected,
                format!(
                    "Your payment for '{}' could not be verified. You may join and submit payment again.",
                    tournament.name
                ),
            )
        };

        let notification = Notification {
            recipient_email: user.email,
            recipient_name: user.name,
            kind,
            tournament_id: tournament.id,
            tournament_name: tournament.name,
            body,
        };

        if let Err(e) = notifier.send(&notification).await {
            tracing::error!(
                payment_id = %payment.id,
                error = %e,
                "Failed to send payment outcome notice"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notification_service::LogNotifier;
    use crate::test_utils::{self, seed};
    use chrono::Duration;

    fn submission(amount: i64) -> PaymentSubmission {
        PaymentSubmission {
            amount,
            payment_method: PaymentMethod::Bkash,
            payer_number: "01712345678".to_string(),
            txn_id: format!("TX{}", Uuid::new_v4().simple()),
        }
    }

    #[tokio::test]
    async fn test_join_twice_returns_the_same_participation() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;
        let user = seed::adult_user(&pool).await;
        let tournament =
            seed::published_tournament(&pool, &admin.id, Utc::now() + Duration::hours(3), 5000)
                .await;

        let first = ParticipationService::join(&pool, &user, &tournament.id)
            .await
            .unwrap();
        let second = ParticipationService::join(&pool, &user, &tournament.id)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, ParticipantStatus::PendingPayment);
    }

    #[tokio::test]
    async fn test_payment_approval_cascades_and_resolves_once() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;
        let user = seed::adult_user(&pool).await;
        let tournament =
            seed::published_tournament(&pool, &admin.id, Utc::now() + Duration::hours(3), 5000)
                .await;

        ParticipationService::join(&pool, &user, &tournament.id)
            .await
            .unwrap();
        let payment =
            ParticipationService::submit_payment(&pool, &user, &tournament.id, submission(5000))
                .await
                .unwrap();

        ParticipationService::resolve_payment(&pool, &LogNotifier, &admin.id, &payment.id, true)
            .await
            .unwrap();

        let participant = ParticipantRepository::find_active(&pool, &user.id, &tournament.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(participant.status, ParticipantStatus::Approved);

        // The second resolution loses the pending-only race
        let again = ParticipationService::resolve_payment(
            &pool,
            &LogNotifier,
            &admin.id,
            &payment.id,
            false,
        )
        .await;
        assert!(matches!(again, Err(AppError::AlreadyResolved)));
    }

    #[tokio::test]
    async fn test_rejected_payment_frees_the_slot_for_rejoin() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;
        let user = seed::adult_user(&pool).await;
        let tournament =
            seed::published_tournament(&pool, &admin.id, Utc::now() + Duration::hours(3), 5000)
                .await;

        let first = ParticipationService::join(&pool, &user, &tournament.id)
            .await
            .unwrap();
        let payment =
            ParticipationService::submit_payment(&pool, &user, &tournament.id, submission(5000))
                .await
                .unwrap();
        ParticipationService::resolve_payment(&pool, &LogNotifier, &admin.id, &payment.id, false)
            .await
            .unwrap();

        assert!(ParticipantRepository::find_active(&pool, &user.id, &tournament.id)
            .await
            .unwrap()
            .is_none());

        let rejoined = ParticipationService::join(&pool, &user, &tournament.id)
            .await
            .unwrap();
        assert_ne!(rejoined.id, first.id);
        assert_eq!(rejoined.status, ParticipantStatus::PendingPayment);
    }

    #[tokio::test]
    async fn test_payment_amount_must_match_entry_fee() {
        let pool = test_utils::test_pool().await;
        let admin = seed::super_admin(&pool).await;
        let user = seed::adult_user(&pool).await;
        let tournament =
            seed::published_tournament(&pool, &admin.id, Utc::now() + Duration::hours(3), 5000)
                .await;

        ParticipationService::join(&pool, &user, &tournament.id)
            .await
            .unwrap();

        let result =
            ParticipationService::submit_payment(&pool, &user, &tournament.id, submission(4999))
                .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
