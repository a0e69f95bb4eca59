//! Participant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's registration record for one tournament.
///
/// At most one non-rejected row exists per (user, tournament); a rejected
/// participation may be retried with a fresh row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tournament_id: Uuid,
    pub payment_id: Option<Uuid>,
    pub status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
}

/// Participation status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "participant_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    PendingPayment,
    PendingVerify,
    Approved,
    Rejected,
}

impl ParticipantStatus {
    /// Terminal states admit no further workflow transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingPayment => write!(f, "pending_payment"),
            Self::PendingVerify => write!(f, "pending_verify"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}
