//! Payment handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{participation_service::PaymentSubmission, ParticipationService},
    state::AppState,
    utils::validation::{validate_payer_number, validate_txn_id},
};

use super::{
    request::SubmitPaymentRequest,
    response::{PaymentResponse, PendingPaymentsResponse},
};

/// Submit payment details for a pending join
pub async fn submit_payment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<SubmitPaymentRequest>,
) -> AppResult<(StatusCode, Json<PaymentResponse>)> {
    payload.validate()?;
    validate_payer_number(&payload.payer_number)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validate_txn_id(&payload.txn_id).map_err(|e| AppError::Validation(e.to_string()))?;

    let user = UserRepository::find_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let payment = ParticipationService::submit_payment(
        state.db(),
        &user,
        &payload.tournament_id,
        PaymentSubmission {
            amount: payload.amount,
            payment_method: payload.payment_method,
            payer_number: payload.payer_number,
            txn_id: payload.txn_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(payment.into())))
}

/// List pending payments (admin queue)
pub async fn list_pending_payments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<PendingPaymentsResponse>> {
    auth_user.require_admin()?;

    let payments = ParticipationService::list_pending_payments(state.db()).await?;

    Ok(Json(PendingPaymentsResponse {
        payments: payments.into_iter().map(Into::into).collect(),
    }))
}

/// Approve a pending payment (admin)
pub async fn approve_payment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentResponse>> {
    auth_user.require_admin()?;

    let payment = ParticipationService::resolve_payment(
        state.db(),
        state.notifier(),
        &auth_user.id,
        &id,
        true,
    )
    .await?;

    Ok(Json(payment.into()))
}

/// Reject a pending payment (admin)
pub async fn reject_payment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentResponse>> {
    auth_user.require_admin()?;

    let payment = ParticipationService::resolve_payment(
        state.db(),
        state.notifier(),
        &auth_user.id,
        &id,
        false,
    )
    .await?;

    Ok(Json(payment.into()))
}
