//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::TournamentStatus;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Workflow errors
    #[error("Age verification required: must be 15 years or older to participate")]
    AgeVerificationRequired,

    #[error("Tournament is not open for joining")]
    TournamentNotJoinable,

    #[error("Tournament has reached its maximum number of participants")]
    TournamentFull,

    #[error("No pending join found for this tournament; join before submitting a payment")]
    NoPendingJoin,

    #[error("Payment has already been resolved")]
    AlreadyResolved,

    #[error("Invalid tournament transition from '{from}' to '{to}'")]
    InvalidTransition {
        from: TournamentStatus,
        to: TournamentStatus,
    },

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Gone: {0}")]
    Gone(String),

    // Infrastructure errors
    #[error("Storage unavailable: {0}")]
    Database(String),

    #[error("Redis error: {0}")]
    Redis(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::AgeVerificationRequired => "AGE_VERIFICATION_REQUIRED",
            Self::TournamentNotJoinable => "TOURNAMENT_NOT_JOINABLE",
            Self::TournamentFull => "TOURNAMENT_FULL",
            Self::NoPendingJoin => "NO_PENDING_JOIN",
            Self::AlreadyResolved => "ALREADY_RESOLVED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",
            Self::Gone(_) => "GONE",
            Self::Database(_) => "STORAGE_UNAVAILABLE",
            Self::Redis(_) => "STORAGE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) | Self::AgeVerificationRequired => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::TournamentNotJoinable
            | Self::TournamentFull
            | Self::NoPendingJoin
            | Self::AlreadyResolved
            | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Gone(_) => StatusCode::GONE,
            // Persistence failures are retryable by the caller
            Self::Database(_) | Self::Redis(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Storage is temporarily unavailable, please retry".to_string()
            }
            AppError::Redis(e) => {
                tracing::error!("Redis error: {}", e);
                "Storage is temporarily unavailable, please retry".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Check for unique constraint violations
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Resource already exists".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Redis(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_errors_are_client_errors() {
        assert_eq!(
            AppError::AgeVerificationRequired.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::TournamentNotJoinable.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::NoPendingJoin.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::AlreadyResolved.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidTransition {
                from: TournamentStatus::Finished,
                to: TournamentStatus::Live,
            }
            .status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_invalid_transition_message_names_both_states() {
        let err = AppError::InvalidTransition {
            from: TournamentStatus::Finished,
            to: TournamentStatus::Live,
        };
        let msg = err.to_string();
        assert!(msg.contains("finished"));
        assert!(msg.contains("live"));
    }

    #[test]
    fn test_expired_resources_are_gone() {
        let err = AppError::Gone("Download link has expired".to_string());
        assert_eq!(err.status_code(), StatusCode::GONE);
        assert_eq!(err.error_code(), "GONE");
    }

    #[test]
    fn test_storage_errors_are_retryable() {
        let err = AppError::Database("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), "STORAGE_UNAVAILABLE");
    }
}
