//! Tournament handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{
        tournament_service::{NewTournament, TournamentUpdate},
        ParticipationService, TournamentService,
    },
    state::AppState,
};

use super::{
    request::{
        CreateTournamentRequest, ListTournamentsQuery, TransitionRequest, UpdateTournamentRequest,
    },
    response::{
        AdminTournamentResponse, ParticipantResponse, TournamentResponse, TournamentsListResponse,
    },
};

fn page_params(query: &ListTournamentsQuery) -> (u32, u32, i64, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = ((page - 1) * per_page) as i64;
    (page, per_page, offset, per_page as i64)
}

/// List publicly visible tournaments
pub async fn list_tournaments(
    State(state): State<AppState>,
    Query(query): Query<ListTournamentsQuery>,
) -> AppResult<Json<TournamentsListResponse>> {
    let (page, per_page, offset, limit) = page_params(&query);

    let (tournaments, total) =
        TournamentService::list_public(state.db(), offset, limit, query.status).await?;

    Ok(Json(TournamentsListResponse {
        tournaments: tournaments.into_iter().map(Into::into).collect(),
        total,
        page,
        per_page,
    }))
}

/// Get a tournament (public view, secrets stripped)
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TournamentResponse>> {
    let tournament = TournamentService::get(state.db(), &id).await?;

    // Drafts are invisible outside the admin surface
    if tournament.status == crate::models::TournamentStatus::Draft {
        return Err(AppError::NotFound("Tournament not found".to_string()));
    }

    Ok(Json(tournament.into()))
}

/// Create a tournament (admin)
pub async fn create_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateTournamentRequest>,
) -> AppResult<(StatusCode, Json<AdminTournamentResponse>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let tournament = TournamentService::create(
        state.db(),
        &auth_user.id,
        NewTournament {
            name: payload.name,
            description: payload.description,
            game: payload.game,
            game_mode: payload.game_mode,
            start_time: payload.start_time,
            entry_fee: payload.entry_fee,
            prize_1: payload.prize_1,
            prize_2: payload.prize_2,
            prize_3: payload.prize_3,
            max_participants: payload.max_participants,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(tournament.into())))
}

/// Update a tournament, including its secret credentials (admin)
pub async fn update_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTournamentRequest>,
) -> AppResult<Json<AdminTournamentResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let tournament = TournamentService::update(
        state.db(),
        &auth_user.id,
        &id,
        TournamentUpdate {
            name: payload.name,
            description: payload.description,
            game: payload.game,
            game_mode: payload.game_mode,
            start_time: payload.start_time,
            entry_fee: payload.entry_fee,
            prize_1: payload.prize_1,
            prize_2: payload.prize_2,
            prize_3: payload.prize_3,
            room_id: payload.room_id,
            room_password: payload.room_password,
            party_code: payload.party_code,
            max_participants: payload.max_participants,
        },
    )
    .await?;

    Ok(Json(tournament.into()))
}

/// Transition a tournament along its lifecycle (admin)
pub async fn transition_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<Json<AdminTournamentResponse>> {
    auth_user.require_admin()?;

    let tournament = TournamentService::transition(
        state.db(),
        state.notifier(),
        &auth_user.id,
        &id,
        payload.status,
    )
    .await?;

    Ok(Json(tournament.into()))
}

/// Delete a tournament (admin)
pub async fn delete_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    TournamentService::delete(state.db(), &auth_user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join a tournament
pub async fn join_tournament(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ParticipantResponse>)> {
    let user = UserRepository::find_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let participant = ParticipationService::join(state.db(), &user, &id).await?;

    Ok((StatusCode::CREATED, Json(participant.into())))
}
