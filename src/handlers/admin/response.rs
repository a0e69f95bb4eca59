//! Admin response DTOs

use serde::Serialize;

use crate::{
    handlers::auth::response::UserResponse,
    models::{AuditLog, Setting},
};

/// Users list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
}

/// Settings list response
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: Vec<Setting>,
}

/// Audit log list response
#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    pub entries: Vec<AuditLog>,
    pub total: i64,
}

/// Result of a manually triggered reminder pass
#[derive(Debug, Serialize)]
pub struct ReminderRunResponse {
    pub tournaments: usize,
    pub sent: usize,
    pub already_sent: usize,
    pub failed: usize,
}
