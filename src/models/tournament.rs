//! Tournament model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tournament database model.
///
/// `room_id`, `room_password` and `party_code` are secret match credentials.
/// They must never reach a non-admin caller except through the disclosure
/// gate; public response DTOs omit them entirely.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub game: String,
    pub game_mode: GameMode,
    pub start_time: DateTime<Utc>,
    /// Entry fee in minor currency units (poisha)
    pub entry_fee: i64,
    pub prize_1: Option<i64>,
    pub prize_2: Option<i64>,
    pub prize_3: Option<i64>,
    pub room_id: Option<String>,
    pub room_password: Option<String>,
    pub party_code: Option<String>,
    pub max_participants: Option<i32>,
    pub status: TournamentStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Whether all three secret credential fields have been set by an admin
    pub fn has_secrets(&self) -> bool {
        self.room_id.is_some() && self.room_password.is_some() && self.party_code.is_some()
    }

    /// Whether users may currently join this tournament
    pub fn is_joinable(&self) -> bool {
        self.status == TournamentStatus::Published
    }
}

/// Tournament lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tournament_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Draft,
    Published,
    Live,
    Finished,
    Cancelled,
}

impl TournamentStatus {
    /// Explicit transition table for admin-driven lifecycle changes.
    ///
    /// draft → published → live → finished, with cancellation allowed from
    /// any non-terminal state. Anything else is rejected.
    pub fn can_transition_to(self, next: TournamentStatus) -> bool {
        use TournamentStatus::*;
        matches!(
            (self, next),
            (Draft, Published)
                | (Published, Live)
                | (Published, Cancelled)
                | (Live, Finished)
                | (Live, Cancelled)
                | (Draft, Cancelled)
        )
    }

    /// Terminal states admit no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }

    /// Whether participants of this tournament are eligible for credential
    /// disclosure and reminders
    pub fn is_active(self) -> bool {
        matches!(self, Self::Published | Self::Live)
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Live => write!(f, "live"),
            Self::Finished => write!(f, "finished"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Game mode enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "game_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Solo,
    Squad,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solo => write!(f, "solo"),
            Self::Squad => write!(f, "squad"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TournamentStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(Draft.can_transition_to(Published));
        assert!(Draft.can_transition_to(Cancelled));
        assert!(Published.can_transition_to(Live));
        assert!(Published.can_transition_to(Cancelled));
        assert!(Live.can_transition_to(Finished));
        assert!(Live.can_transition_to(Cancelled));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!Draft.can_transition_to(Live));
        assert!(!Draft.can_transition_to(Finished));
        assert!(!Published.can_transition_to(Finished));
        assert!(!Published.can_transition_to(Draft));
        assert!(!Live.can_transition_to(Published));
        assert!(!Finished.can_transition_to(Live));
        assert!(!Cancelled.can_transition_to(Published));
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for from in [Finished, Cancelled] {
            for to in [Draft, Published, Live, Finished, Cancelled] {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn test_self_transitions_rejected() {
        for status in [Draft, Published, Live, Finished, Cancelled] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_terminal_flags() {
        assert!(Finished.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Draft.is_terminal());
        assert!(!Published.is_terminal());
        assert!(!Live.is_terminal());
    }
}
