//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod disclosure;
pub mod notification_service;
pub mod order_service;
pub mod participation_service;
pub mod reminder_service;
pub mod tournament_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use notification_service::{LogNotifier, Notifier, WebhookNotifier};
pub use order_service::OrderService;
pub use participation_service::ParticipationService;
pub use reminder_service::ReminderService;
pub use tournament_service::TournamentService;
