//! Website order handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    services::{order_service::NewOrder, OrderService},
    state::AppState,
    utils::validation::{validate_payer_number, validate_txn_id},
};

use super::{
    request::CreateOrderRequest,
    response::{DownloadResponse, OrderResponse},
};

/// Place a website source-code order (no account required)
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    payload.validate()?;
    validate_payer_number(&payload.payer_number)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validate_txn_id(&payload.txn_id).map_err(|e| AppError::Validation(e.to_string()))?;

    let order = OrderService::create(
        state.db(),
        NewOrder {
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            amount: payload.amount,
            payment_method: payload.payment_method,
            payer_number: payload.payer_number,
            txn_id: payload.txn_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// Validate a download token
pub async fn download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DownloadResponse>> {
    let now = Utc::now();
    let order = OrderService::validate_download(state.db(), &token, now).await?;

    // token_valid_at checked expiry presence above
    let expires_at = order
        .token_expires_at
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Approved order missing token expiry")))?;

    Ok(Json(DownloadResponse {
        order_id: order.id,
        expires_at,
        message: "Download link is valid".to_string(),
    }))
}
