//! Admin handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    handlers::{
        orders::response::{AdminOrderResponse, OrdersListResponse},
        tournaments::response::AdminTournamentResponse,
    },
    middleware::auth::AuthenticatedUser,
    services::{
        admin_service::PlatformStats, AdminService, OrderService, ReminderService,
        TournamentService,
    },
    state::AppState,
};

use super::{
    request::{
        AdminOrdersQuery, AdminTournamentsQuery, PageQuery, UpdateRoleRequest,
        UpdateSettingRequest,
    },
    response::{AuditLogResponse, ReminderRunResponse, SettingsResponse, UsersListResponse},
};

fn page_params(page: Option<u32>, per_page: Option<u32>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    (((page - 1) * per_page) as i64, per_page as i64)
}

/// Platform stats for the dashboard
pub async fn stats(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<PlatformStats>> {
    auth_user.require_admin()?;

    let stats = AdminService::stats(state.db()).await?;
    Ok(Json(stats))
}

/// List users
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<UsersListResponse>> {
    auth_user.require_admin()?;

    let (offset, limit) = page_params(query.page, query.per_page);
    let (users, total) = AdminService::list_users(state.db(), offset, limit).await?;

    Ok(Json(UsersListResponse {
        users: users.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Change a user's role (super admin only, enforced in the service)
pub async fn update_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<crate::handlers::auth::response::UserResponse>> {
    auth_user.require_admin()?;

    let actor = UserRepository::find_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let updated = AdminService::update_role(state.db(), &actor, &id, payload.role).await?;

    Ok(Json(updated.into()))
}

/// Delete a user account (super admin only, enforced in the service)
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<axum::http::StatusCode> {
    auth_user.require_admin()?;

    let actor = UserRepository::find_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    AdminService::delete_user(state.db(), &actor, &id).await?;

    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// List all tournaments including drafts
pub async fn list_tournaments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<AdminTournamentsQuery>,
) -> AppResult<Json<Vec<AdminTournamentResponse>>> {
    auth_user.require_admin()?;

    let (offset, limit) = page_params(query.page, query.per_page);
    let (tournaments, _total) =
        TournamentService::list_all(state.db(), offset, limit, query.status).await?;

    Ok(Json(tournaments.into_iter().map(Into::into).collect()))
}

/// List website orders
pub async fn list_orders(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<AdminOrdersQuery>,
) -> AppResult<Json<OrdersListResponse>> {
    auth_user.require_admin()?;

    let (offset, limit) = page_params(query.page, query.per_page);
    let (orders, total) = OrderService::list(state.db(), offset, limit, query.status).await?;

    Ok(Json(OrdersListResponse {
        orders: orders.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Approve a website order
pub async fn approve_order(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AdminOrderResponse>> {
    auth_user.require_admin()?;

    let order = OrderService::approve(state.db(), &auth_user.id, &id).await?;
    Ok(Json(order.into()))
}

/// Reject a website order
pub async fn reject_order(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AdminOrderResponse>> {
    auth_user.require_admin()?;

    let order = OrderService::reject(state.db(), &auth_user.id, &id).await?;
    Ok(Json(order.into()))
}

/// List site settings
pub async fn list_settings(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<SettingsResponse>> {
    auth_user.require_admin()?;

    let settings = AdminService::list_settings(state.db()).await?;
    Ok(Json(SettingsResponse { settings }))
}

/// Create or update a site setting
pub async fn update_setting(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(key): Path<String>,
    Json(payload): Json<UpdateSettingRequest>,
) -> AppResult<Json<crate::models::Setting>> {
    auth_user.require_admin()?;

    let setting =
        AdminService::upsert_setting(state.db(), &auth_user.id, &key, &payload.value).await?;
    Ok(Json(setting))
}

/// Recent audit log entries
pub async fn audit_log(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AuditLogResponse>> {
    auth_user.require_admin()?;

    let (offset, limit) = page_params(query.page, query.per_page);
    let (entries, total) = AdminService::audit_log(state.db(), offset, limit).await?;

    Ok(Json(AuditLogResponse { entries, total }))
}

/// Trigger a reminder pass immediately instead of waiting for the
/// scheduler tick
pub async fn run_reminders(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ReminderRunResponse>> {
    auth_user.require_admin()?;

    let summary = ReminderService::run_tick(state.db(), state.notifier(), Utc::now()).await?;

    Ok(Json(ReminderRunResponse {
        tournaments: summary.tournaments,
        sent: summary.sent,
        already_sent: summary.already_sent,
        failed: summary.failed,
    }))
}
