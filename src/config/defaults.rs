// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Server**: where the café API lives
//! - **Notifications**: banner lifetime and stacking
//! - **Requests**: optional timeout
//! - **Dashboard**: order refresh cadence and reload delay

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Default base URL of the café server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default banner lifetime in milliseconds.
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5000;

/// Minimum banner lifetime in milliseconds.
pub const MIN_NOTIFICATION_TTL_MS: u64 = 100;

/// Maximum banner lifetime in milliseconds.
pub const MAX_NOTIFICATION_TTL_MS: u64 = 60_000;

/// Default number of banners visible at once.
pub const DEFAULT_MAX_NOTIFICATIONS: usize = 5;

/// Minimum number of banners visible at once.
pub const MIN_MAX_NOTIFICATIONS: usize = 1;

/// Maximum number of banners visible at once.
pub const MAX_MAX_NOTIFICATIONS: usize = 20;

// ==========================================================================
// Request Defaults
// ==========================================================================

/// Upper bound for a configured request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Dashboard Defaults
// ==========================================================================

/// Default admin order refresh period (in seconds).
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Minimum admin order refresh period (in seconds).
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;

/// Delay between a sold-out toggle banner and the page reload (in milliseconds).
pub const RELOAD_DELAY_MS: u64 = 1000;

// ==========================================================================
// Formatting Defaults
// ==========================================================================

/// Default length used by [`crate::format::truncate`].
pub const DEFAULT_TRUNCATE_LEN: usize = 50;

/// Default date pattern used by [`crate::format::format_date`].
pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD";
