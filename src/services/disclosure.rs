//! Secret credential disclosure gate
//!
//! Match credentials (room ID, room password, party code) stay hidden from
//! participants until shortly before start. The gate is a pure predicate
//! over the caller's participation, the tournament and a caller-supplied
//! clock, so every boundary is unit-testable without a database.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    constants::REVEAL_WINDOW_MINUTES,
    models::{ParticipantStatus, TournamentStatus},
};

/// The fields the disclosure gate controls
#[derive(Debug, Clone, Serialize)]
pub struct SecretInfo {
    pub room_id: String,
    pub room_password: String,
    pub party_code: String,
}

/// Inputs to the disclosure decision for one (participant, tournament) pair
#[derive(Debug, Clone, Copy)]
pub struct DisclosureCheck {
    pub participant_status: ParticipantStatus,
    pub tournament_status: TournamentStatus,
    pub start_time: DateTime<Utc>,
    pub has_secrets: bool,
}

/// Whether secrets may be revealed at `now`.
///
/// All four conditions must hold: the participation is approved, the
/// tournament is published or live, all three secret fields are set, and
/// `now` is within REVEAL_WINDOW_MINUTES of start. The window opens exactly
/// at the boundary and never closes on its own; once open it stays open
/// through and past start until the tournament leaves the active states.
pub fn can_reveal(check: &DisclosureCheck, now: DateTime<Utc>) -> bool {
    check.participant_status == ParticipantStatus::Approved
        && check.tournament_status.is_active()
        && check.has_secrets
        && check.start_time - now <= Duration::minutes(REVEAL_WINDOW_MINUTES)
}

/// Secrets for a revealed tournament, or None while the gate is closed
pub fn reveal(
    check: &DisclosureCheck,
    room_id: Option<&str>,
    room_password: Option<&str>,
    party_code: Option<&str>,
    now: DateTime<Utc>,
) -> Option<SecretInfo> {
    if !can_reveal(check, now) {
        return None;
    }

    match (room_id, room_password, party_code) {
        (Some(room_id), Some(room_password), Some(party_code)) => Some(SecretInfo {
            room_id: room_id.to_string(),
            room_password: room_password.to_string(),
            party_code: party_code.to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap()
    }

    fn check() -> DisclosureCheck {
        DisclosureCheck {
            participant_status: ParticipantStatus::Approved,
            tournament_status: TournamentStatus::Published,
            start_time: start(),
            has_secrets: true,
        }
    }

    #[test]
    fn test_closed_strictly_before_window() {
        let now = start() - Duration::minutes(5) - Duration::seconds(1);
        assert!(!can_reveal(&check(), now));
    }

    #[test]
    fn test_opens_exactly_at_boundary() {
        let now = start() - Duration::minutes(5);
        assert!(can_reveal(&check(), now));
    }

    #[test]
    fn test_open_at_and_after_start() {
        assert!(can_reveal(&check(), start()));
        assert!(can_reveal(&check(), start() + Duration::minutes(30)));
    }

    #[test]
    fn test_closed_for_non_approved_participants() {
        for status in [
            ParticipantStatus::PendingPayment,
            ParticipantStatus::PendingVerify,
            ParticipantStatus::Rejected,
        ] {
            let c = DisclosureCheck {
                participant_status: status,
                ..check()
            };
            assert!(!can_reveal(&c, start()));
        }
    }

    #[test]
    fn test_closed_outside_active_tournament_states() {
        for status in [
            TournamentStatus::Draft,
            TournamentStatus::Finished,
            TournamentStatus::Cancelled,
        ] {
            let c = DisclosureCheck {
                tournament_status: status,
                ..check()
            };
            assert!(!can_reveal(&c, start()));
        }
        let live = DisclosureCheck {
            tournament_status: TournamentStatus::Live,
            ..check()
        };
        assert!(can_reveal(&live, start()));
    }

    #[test]
    fn test_closed_when_secrets_missing() {
        let c = DisclosureCheck {
            has_secrets: false,
            ..check()
        };
        assert!(!can_reveal(&c, start()));
    }

    #[test]
    fn test_reveal_returns_all_three_fields() {
        let info = reveal(&check(), Some("room-1"), Some("pw"), Some("party"), start());
        let info = info.unwrap();
        assert_eq!(info.room_id, "room-1");
        assert_eq!(info.room_password, "pw");
        assert_eq!(info.party_code, "party");
    }

    #[test]
    fn test_reveal_none_while_closed() {
        let now = start() - Duration::minutes(10);
        assert!(reveal(&check(), Some("room-1"), Some("pw"), Some("party"), now).is_none());
    }
}
