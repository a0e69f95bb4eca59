//! Database models
//!
//! Row types and database enums shared by repositories, services and
//! handler DTOs.

pub mod audit;
pub mod order;
pub mod participant;
pub mod payment;
pub mod reminder;
pub mod setting;
pub mod tournament;
pub mod user;

pub use audit::AuditLog;
pub use order::{OrderStatus, WebsiteOrder};
pub use participant::{Participant, ParticipantStatus};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use reminder::Milestone;
pub use setting::Setting;
pub use tournament::{GameMode, Tournament, TournamentStatus};
pub use user::{User, UserRole};
