//! User-facing participation response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::repositories::ParticipationWithTournament,
    models::{GameMode, ParticipantStatus, TournamentStatus},
    services::disclosure::SecretInfo,
};

/// One of the user's tournaments, with secrets present only when the
/// disclosure gate is open
#[derive(Debug, Serialize)]
pub struct MyTournamentResponse {
    pub participant_id: Uuid,
    pub participant_status: ParticipantStatus,
    pub joined_at: DateTime<Utc>,
    pub tournament_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub game: String,
    pub game_mode: GameMode,
    pub start_time: DateTime<Utc>,
    pub entry_fee: i64,
    pub prize_1: Option<i64>,
    pub prize_2: Option<i64>,
    pub prize_3: Option<i64>,
    pub status: TournamentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_info: Option<SecretInfo>,
}

impl MyTournamentResponse {
    pub fn from_row(row: ParticipationWithTournament, secrets: Option<SecretInfo>) -> Self {
        Self {
            participant_id: row.participant_id,
            participant_status: row.participant_status,
            joined_at: row.joined_at,
            tournament_id: row.tournament_id,
            name: row.name,
            description: row.description,
            game: row.game,
            game_mode: row.game_mode,
            start_time: row.start_time,
            entry_fee: row.entry_fee,
            prize_1: row.prize_1,
            prize_2: row.prize_2,
            prize_3: row.prize_3,
            status: row.status,
            secret_info: secrets,
        }
    }
}

/// User tournaments list response
#[derive(Debug, Serialize)]
pub struct MyTournamentsResponse {
    pub tournaments: Vec<MyTournamentResponse>,
}
