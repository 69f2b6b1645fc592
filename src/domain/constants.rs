// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use std::time::Duration;

// =============================================================================
// BACKEND
// =============================================================================

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

pub const STATUS_PATH: &str = "status";
pub const START_PATH: &str = "start";
pub const STOP_PATH: &str = "stop";
pub const REINITIALIZE_DB_PATH: &str = "reinitialize-db";
pub const SETTINGS_PATH: &str = "settings";

pub const STATUS_RUNNING: &str = "running";
pub const STATUS_STOPPED: &str = "stopped";

// =============================================================================
// TIMING
// =============================================================================

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub const SETTINGS_SUCCESS_TTL: Duration = Duration::from_secs(10);
pub const REINIT_LOCAL_SUCCESS_TTL: Duration = Duration::from_secs(3);
pub const REINIT_SYSTEM_SUCCESS_TTL: Duration = Duration::from_secs(6);

pub const UI_REPAINT_INTERVAL: Duration = Duration::from_millis(200);

// =============================================================================
// MESSAGES
// =============================================================================

pub const REINIT_CONFIRM_PROMPT: &str =
    "Are you sure you want to reinitialize the database? This will delete all existing data.";
pub const REINIT_SUCCESS_MESSAGE: &str = "Database reinitialized successfully";
pub const FETCH_SETTINGS_FAILED: &str = "Failed to fetch settings";
pub const UPDATE_SETTINGS_FAILED: &str = "Failed to update settings";

pub const NO_POSITIONS: &str = "No positions";
pub const NO_ORDERS: &str = "No orders";
pub const UNKNOWN_STATUS: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";
