// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::{STATUS_RUNNING, STATUS_STOPPED};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One fetched copy of the backend's trading status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub status: Option<String>,
    pub last_update: Option<String>,
    pub daily_pnl: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub positions: Vec<Position>,
    #[serde(deserialize_with = "null_as_default")]
    pub orders: Vec<Order>,
}

impl StatusSnapshot {
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.status() == Some(STATUS_RUNNING)
    }

    pub fn is_stopped(&self) -> bool {
        self.status() == Some(STATUS_STOPPED)
    }

    /// The backend appends positions; the last one is the open position.
    pub fn current_position(&self) -> Option<&Position> {
        self.positions.last()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub avg_price: f64,
}

/// Order as reported by the backend. Ids and quantities arrive as numbers or
/// strings depending on the broker, so they stay loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub order_id: Value,
    pub symbol: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub total_quantity: Value,
}

/// Acknowledgement body of a command endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ack(pub Value);

impl Ack {
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }
}

/// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
