//! User-facing participation handlers

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::ParticipationService,
    state::AppState,
};

use super::response::{MyTournamentResponse, MyTournamentsResponse};

/// The current user's tournaments, with gate-filtered secrets
pub async fn my_tournaments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MyTournamentsResponse>> {
    let rows =
        ParticipationService::list_user_tournaments(state.db(), &auth_user.id, Utc::now()).await?;

    Ok(Json(MyTournamentsResponse {
        tournaments: rows
            .into_iter()
            .map(|(row, secrets)| MyTournamentResponse::from_row(row, secrets))
            .collect(),
    }))
}
