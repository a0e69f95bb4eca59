//! Shared helpers for database-backed tests
//!
//! A single PostgreSQL container is started lazily and shared by every
//! test in the binary; isolation comes from per-test rows with unique
//! identifiers, not per-test databases.

use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::notification_service::{Notification, Notifier};

static POSTGRES: OnceCell<ContainerAsync<Postgres>> = OnceCell::const_new();
static DATABASE_URL: OnceCell<String> = OnceCell::const_new();

async fn database_url() -> &'static str {
    DATABASE_URL
        .get_or_init(|| async {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                return url;
            }
            let container = POSTGRES
                .get_or_init(|| async {
                    Postgres::default()
                        .with_user("ffarena")
                        .with_password("ffarena_test")
                        .with_db_name("ffarena_test")
                        .start()
                        .await
                        .expect("Failed to start PostgreSQL container")
                })
                .await;

            let host = container.get_host().await.expect("container host");
            let port = container
                .get_host_port_ipv4(5432)
                .await
                .expect("container port");
            format!("postgres://ffarena:ffarena_test@{}:{}/ffarena_test", host, port)
        })
        .await
}

/// Connect to the shared test database, running migrations first.
/// Migration runs take an advisory lock, so concurrent tests are safe.
pub async fn test_pool() -> PgPool {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url().await)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Notifier double that records every delivery
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Deliveries recorded for one tournament, so concurrently running
    /// tests do not see each other's notifications
    pub fn sent_for(&self, tournament_id: &Uuid) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.tournament_id == *tournament_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Row factories for tests that need users, tournaments and participations
pub mod seed {
    use chrono::{DateTime, Duration, NaiveDate, Utc};
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::db::repositories::{TournamentRepository, UserRepository};
    use crate::models::{
        GameMode, PaymentMethod, Tournament, TournamentStatus, User, UserRole,
    };
    use crate::services::notification_service::LogNotifier;
    use crate::services::participation_service::{ParticipationService, PaymentSubmission};

    /// A date of birth putting the person `years` old today
    pub fn dob_years_ago(years: i64) -> NaiveDate {
        (Utc::now() - Duration::days(365 * years + 30)).date_naive()
    }

    /// An age-verified adult with a unique email
    pub async fn adult_user(pool: &PgPool) -> User {
        let email = format!("player-{}@example.com", Uuid::new_v4());
        let user = UserRepository::create(
            pool,
            "Test Player",
            &email,
            "not-a-real-hash",
            Some(dob_years_ago(20)),
            true,
            true,
        )
        .await
        .expect("seed user");

        UserRepository::verify_age(pool, &user.id, dob_years_ago(20))
            .await
            .expect("verify age")
    }

    /// A super admin for operations that audit an actor
    pub async fn super_admin(pool: &PgPool) -> User {
        let email = format!("admin-{}@example.com", Uuid::new_v4());
        let user = UserRepository::create(pool, "Test Admin", &email, "not-a-real-hash", None, true, true)
            .await
            .expect("seed admin");

        UserRepository::update_role(pool, &user.id, UserRole::SuperAdmin)
            .await
            .expect("grant role")
    }

    /// A published tournament starting at `start_time`
    pub async fn published_tournament(
        pool: &PgPool,
        admin_id: &Uuid,
        start_time: DateTime<Utc>,
        entry_fee: i64,
    ) -> Tournament {
        let tournament = TournamentRepository::create(
            pool,
            &format!("Test Cup {}", Uuid::new_v4()),
            None,
            "Free Fire",
            GameMode::Squad,
            start_time,
            entry_fee,
            Some(100_000),
            None,
            None,
            None,
            admin_id,
        )
        .await
        .expect("seed tournament");

        TournamentRepository::update_status_if(
            pool,
            &tournament.id,
            TournamentStatus::Draft,
            TournamentStatus::Published,
        )
        .await
        .expect("publish")
        .expect("was draft")
    }

    /// Run the user through join, payment submission and approval
    pub async fn approved_participant(
        pool: &PgPool,
        user: &User,
        admin: &User,
        tournament: &Tournament,
    ) {
        ParticipationService::join(pool, user, &tournament.id)
            .await
            .expect("join");

        let payment = ParticipationService::submit_payment(
            pool,
            user,
            &tournament.id,
            PaymentSubmission {
                amount: tournament.entry_fee,
                payment_method: PaymentMethod::Bkash,
                payer_number: "01712345678".to_string(),
                txn_id: format!("TX{}", Uuid::new_v4().simple()),
            },
        )
        .await
        .expect("submit payment");

        ParticipationService::resolve_payment(pool, &LogNotifier, &admin.id, &payment.id, true)
            .await
            .expect("approve payment");
    }
}
