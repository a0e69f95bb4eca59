//! Tournament request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_TOURNAMENT_DESCRIPTION_LENGTH, MAX_TOURNAMENT_NAME_LENGTH},
    models::{GameMode, TournamentStatus},
};

/// Create tournament request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = MAX_TOURNAMENT_NAME_LENGTH))]
    pub name: String,

    #[validate(length(max = MAX_TOURNAMENT_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(length(min = 1))]
    pub game: String,

    pub game_mode: GameMode,

    /// Tournament start time
    pub start_time: DateTime<Utc>,

    /// Entry fee in minor currency units
    #[validate(range(min = 0))]
    pub entry_fee: i64,

    pub prize_1: Option<i64>,
    pub prize_2: Option<i64>,
    pub prize_3: Option<i64>,

    #[validate(range(min = 1))]
    pub max_participants: Option<i32>,
}

/// Update tournament request (partial; secrets are set here)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTournamentRequest {
    #[validate(length(min = 1, max = MAX_TOURNAMENT_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(length(max = MAX_TOURNAMENT_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub game: Option<String>,
    pub game_mode: Option<GameMode>,
    pub start_time: Option<DateTime<Utc>>,

    #[validate(range(min = 0))]
    pub entry_fee: Option<i64>,

    pub prize_1: Option<i64>,
    pub prize_2: Option<i64>,
    pub prize_3: Option<i64>,

    pub room_id: Option<String>,
    pub room_password: Option<String>,
    pub party_code: Option<String>,

    #[validate(range(min = 1))]
    pub max_participants: Option<i32>,
}

/// Status transition request
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: TournamentStatus,
}

/// List tournaments query parameters
#[derive(Debug, Deserialize)]
pub struct ListTournamentsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<TournamentStatus>,
}
