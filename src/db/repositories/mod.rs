//! Database repositories
//!
//! Each repository wraps the raw SQL for one table (or a small cluster of
//! related tables) behind typed async functions.

pub mod audit_repo;
pub mod order_repo;
pub mod participant_repo;
pub mod payment_repo;
pub mod reminder_repo;
pub mod settings_repo;
pub mod tournament_repo;
pub mod user_repo;

pub use audit_repo::AuditRepository;
pub use order_repo::OrderRepository;
pub use participant_repo::{ApprovedParticipant, ParticipantRepository, ParticipationWithTournament};
pub use payment_repo::{PaymentRepository, PendingPayment};
pub use reminder_repo::ReminderRepository;
pub use settings_repo::SettingsRepository;
pub use tournament_repo::TournamentRepository;
pub use user_repo::UserRepository;
