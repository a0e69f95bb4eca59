//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Minimum age (in years) required to join tournaments
pub const MIN_PARTICIPANT_AGE: i32 = 15;

// =============================================================================
// DISCLOSURE & REMINDERS
// =============================================================================

/// Minutes before start_time at which secret match credentials unlock
pub const REVEAL_WINDOW_MINUTES: i64 = 5;

/// How far ahead (minutes) a scheduler tick looks for upcoming tournaments.
/// One minute past the largest milestone so a tournament is picked up on the
/// first tick after it enters the m30 window.
pub const REMINDER_LOOKAHEAD_MINUTES: i64 = 31;

/// Default scheduler tick interval in seconds
pub const DEFAULT_SCHEDULER_TICK_SECONDS: u64 = 60;

/// Default per-notification send timeout in seconds
pub const DEFAULT_NOTIFY_TIMEOUT_SECONDS: u64 = 10;

// =============================================================================
// PAYMENTS & ORDERS
// =============================================================================

/// Fixed website source-code purchase price in minor currency units
/// (15,000.00 BDT expressed in poisha)
pub const WEBSITE_ORDER_PRICE: i64 = 1_500_000;

/// Download token validity window in days
pub const DOWNLOAD_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Download token length in characters
pub const DOWNLOAD_TOKEN_LENGTH: usize = 40;

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum tournament name length
pub const MAX_TOURNAMENT_NAME_LENGTH: u64 = 256;

/// Maximum tournament description length
pub const MAX_TOURNAMENT_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum display-name length
pub const MAX_NAME_LENGTH: u64 = 128;

/// Maximum payer phone number length
pub const MAX_PAYER_NUMBER_LENGTH: u64 = 20;

/// Maximum transaction ID length
pub const MAX_TXN_ID_LENGTH: u64 = 64;
