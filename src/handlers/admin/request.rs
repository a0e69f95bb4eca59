//! Admin request DTOs

use serde::Deserialize;

use crate::models::{OrderStatus, TournamentStatus, UserRole};

/// Role change request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

/// Setting update request
#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    pub value: String,
}

/// Generic pagination query
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Admin tournament list query
#[derive(Debug, Deserialize)]
pub struct AdminTournamentsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<TournamentStatus>,
}

/// Admin order list query
#[derive(Debug, Deserialize)]
pub struct AdminOrdersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<OrderStatus>,
}
