//! Tournament response DTOs
//!
//! Public DTOs never carry the secret credential fields; those travel
//! only through the admin view and the disclosure-gated user listing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{GameMode, Participant, ParticipantStatus, Tournament, TournamentStatus};

/// Public tournament view (no secrets)
#[derive(Debug, Serialize)]
pub struct TournamentResponse {
    pub id: Uuid,
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
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Tournament> for TournamentResponse {
    fn from(t: Tournament) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            game: t.game,
            game_mode: t.game_mode,
            start_time: t.start_time,
            entry_fee: t.entry_fee,
            prize_1: t.prize_1,
            prize_2: t.prize_2,
            prize_3: t.prize_3,
            max_participants: t.max_participants,
            status: t.status,
            created_at: t.created_at,
        }
    }
}

/// Admin tournament view, including the secret credential fields
#[derive(Debug, Serialize)]
pub struct AdminTournamentResponse {
    #[serde(flatten)]
    pub tournament: TournamentResponse,
    pub room_id: Option<String>,
    pub room_password: Option<String>,
    pub party_code: Option<String>,
}

impl From<Tournament> for AdminTournamentResponse {
    fn from(t: Tournament) -> Self {
        let room_id = t.room_id.clone();
        let room_password = t.room_password.clone();
        let party_code = t.party_code.clone();
        Self {
            tournament: t.into(),
            room_id,
            room_password,
            party_code,
        }
    }
}

/// Tournament list response
#[derive(Debug, Serialize)]
pub struct TournamentsListResponse {
    pub tournaments: Vec<TournamentResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Participation created by joining
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id,
            tournament_id: p.tournament_id,
            status: p.status,
            created_at: p.created_at,
        }
    }
}
