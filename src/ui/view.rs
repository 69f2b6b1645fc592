// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

//! Rendering rules of the dashboard, free of any widget toolkit.

use crate::common::format::{format_grouped, format_loose, format_usd};
use crate::domain::constants::{
    NO_ORDERS, NO_POSITIONS, NOT_AVAILABLE, STATUS_RUNNING, STATUS_STOPPED, UNKNOWN_STATUS,
};
use crate::domain::model::{Order, StatusSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PnlDisplay {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRow {
    pub symbol: String,
    pub quantity: String,
    pub avg_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order_id: String,
    pub symbol: String,
    pub order_type: String,
    pub action: String,
    pub action_tone: Tone,
    pub status: Badge,
    pub quantity: String,
}

/// Table body: data rows, or one placeholder row spanning every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody<R> {
    Rows(Vec<R>),
    Placeholder(&'static str),
}

impl<R> TableBody<R> {
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Placeholder(_) => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButtons {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

pub const POSITION_COLUMNS: [&str; 3] = ["Symbol", "Quantity", "Avg Price"];
pub const ORDER_COLUMNS: [&str; 6] = ["Order ID", "Symbol", "Type", "Action", "Status", "Quantity"];

pub fn status_badge(snapshot: Option<&StatusSnapshot>) -> Badge {
    let status = snapshot.and_then(StatusSnapshot::status);
    Badge {
        label: status
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STATUS)
            .to_string(),
        tone: if status == Some(STATUS_RUNNING) {
            Tone::Positive
        } else {
            Tone::Negative
        },
    }
}

pub fn last_update(snapshot: Option<&StatusSnapshot>) -> String {
    snapshot
        .and_then(|s| s.last_update.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn daily_pnl(snapshot: Option<&StatusSnapshot>) -> PnlDisplay {
    let value = snapshot
        .and_then(|s| s.daily_pnl)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    let text = format_usd(value);
    let tone = if text.starts_with('-') {
        Tone::Negative
    } else {
        Tone::Positive
    };
    PnlDisplay { text, tone }
}

pub fn position_table(snapshot: Option<&StatusSnapshot>) -> TableBody<PositionRow> {
    match snapshot.and_then(StatusSnapshot::current_position) {
        Some(position) => TableBody::Rows(vec![PositionRow {
            symbol: position.symbol.clone(),
            quantity: position.quantity.to_string(),
            avg_price: format_grouped(position.avg_price, 2),
        }]),
        None => TableBody::Placeholder(NO_POSITIONS),
    }
}

pub fn order_table(snapshot: Option<&StatusSnapshot>) -> TableBody<OrderRow> {
    let orders = snapshot.map(|s| s.orders.as_slice()).unwrap_or_default();
    if orders.is_empty() {
        return TableBody::Placeholder(NO_ORDERS);
    }
    TableBody::Rows(orders.iter().rev().map(order_row).collect())
}

fn order_row(order: &Order) -> OrderRow {
    OrderRow {
        order_id: format_loose(&order.order_id),
        symbol: order
            .symbol
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        order_type: order.order_type.clone(),
        action: order.action.clone(),
        action_tone: if order.action == "BUY" {
            Tone::Positive
        } else {
            Tone::Negative
        },
        status: Badge {
            label: order.status.clone(),
            tone: match order.status.as_str() {
                "FILLED" => Tone::Positive,
                "CANCELLED" => Tone::Negative,
                _ => Tone::Warning,
            },
        },
        quantity: format_loose(&order.total_quantity),
    }
}

pub fn control_buttons(busy: bool, status: Option<&str>) -> ControlButtons {
    ControlButtons {
        start_enabled: !busy && status != Some(STATUS_RUNNING),
        stop_enabled: !busy && status != Some(STATUS_STOPPED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Position;
    use serde_json::json;

    fn snapshot_with_status(status: &str) -> StatusSnapshot {
        StatusSnapshot {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn order(id: u64, action: &str, status: &str) -> Order {
        Order {
            order_id: json!(id),
            symbol: Some("MNQ".into()),
            order_type: "MKT".into(),
            action: action.into(),
            status: status.into(),
            total_quantity: json!(1),
        }
    }

    #[test]
    fn badge_is_green_only_when_running() {
        assert_eq!(
            status_badge(Some(&snapshot_with_status("running"))).tone,
            Tone::Positive
        );
        for status in ["stopped", "paused", ""] {
            assert_eq!(
                status_badge(Some(&snapshot_with_status(status))).tone,
                Tone::Negative
            );
        }
        let none = status_badge(None);
        assert_eq!(none.tone, Tone::Negative);
        assert_eq!(none.label, "Unknown");
    }

    #[test]
    fn badge_depends_only_on_latest_snapshot() {
        let mut snap = snapshot_with_status("running");
        snap.daily_pnl = Some(-500.0);
        snap.orders = vec![order(1, "SELL", "CANCELLED")];
        assert_eq!(status_badge(Some(&snap)).tone, Tone::Positive);
    }

    #[test]
    fn pnl_absent_renders_zero() {
        assert_eq!(
            daily_pnl(None),
            PnlDisplay {
                text: "$0.00".into(),
                tone: Tone::Positive
            }
        );
        assert_eq!(daily_pnl(Some(&StatusSnapshot::default())).text, "$0.00");
    }

    #[test]
    fn negative_pnl_is_red_with_leading_sign() {
        let snap = StatusSnapshot {
            daily_pnl: Some(-12.5),
            ..Default::default()
        };
        assert_eq!(
            daily_pnl(Some(&snap)),
            PnlDisplay {
                text: "-$12.50".into(),
                tone: Tone::Negative
            }
        );
    }

    #[test]
    fn positive_pnl_is_grouped() {
        let snap = StatusSnapshot {
            daily_pnl: Some(1234.5),
            ..Default::default()
        };
        assert_eq!(daily_pnl(Some(&snap)).text, "$1,234.50");
    }

    #[test]
    fn empty_positions_show_single_placeholder() {
        let body = position_table(Some(&StatusSnapshot::default()));
        assert_eq!(body, TableBody::Placeholder("No positions"));
        assert_eq!(body.row_count(), 1);
        assert_eq!(position_table(None), TableBody::Placeholder("No positions"));
    }

    #[test]
    fn only_last_position_is_shown() {
        let snap = StatusSnapshot {
            positions: vec![
                Position {
                    symbol: "MNQH6".into(),
                    quantity: 1.0,
                    avg_price: 21000.0,
                },
                Position {
                    symbol: "MNQM6".into(),
                    quantity: 2.0,
                    avg_price: 21456.25,
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            position_table(Some(&snap)),
            TableBody::Rows(vec![PositionRow {
                symbol: "MNQM6".into(),
                quantity: "2".into(),
                avg_price: "21,456.25".into(),
            }])
        );
    }

    #[test]
    fn orders_render_most_recent_first() {
        let snap = StatusSnapshot {
            orders: vec![
                order(1, "BUY", "FILLED"),
                order(2, "SELL", "CANCELLED"),
                order(3, "BUY", "SUBMITTED"),
            ],
            ..Default::default()
        };
        let TableBody::Rows(rows) = order_table(Some(&snap)) else {
            panic!("expected rows");
        };
        let ids: Vec<&str> = rows.iter().map(|r| r.order_id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);

        assert_eq!(rows[0].status.tone, Tone::Warning);
        assert_eq!(rows[1].status.tone, Tone::Negative);
        assert_eq!(rows[1].action_tone, Tone::Negative);
        assert_eq!(rows[2].status.tone, Tone::Positive);
        assert_eq!(rows[2].action_tone, Tone::Positive);
    }

    #[test]
    fn orders_keep_duplicates_and_fill_missing_symbol() {
        let mut unnamed = order(9, "BUY", "FILLED");
        unnamed.symbol = None;
        let snap = StatusSnapshot {
            orders: vec![unnamed.clone(), unnamed],
            ..Default::default()
        };
        let body = order_table(Some(&snap));
        assert_eq!(body.row_count(), 2);
        let TableBody::Rows(rows) = body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].symbol, "N/A");
    }

    #[test]
    fn empty_orders_show_placeholder() {
        assert_eq!(order_table(None), TableBody::Placeholder("No orders"));
        assert_eq!(
            order_table(Some(&StatusSnapshot::default())),
            TableBody::Placeholder("No orders")
        );
    }

    #[test]
    fn button_policy_follows_status_and_busy() {
        assert_eq!(
            control_buttons(false, Some("running")),
            ControlButtons {
                start_enabled: false,
                stop_enabled: true
            }
        );
        assert_eq!(
            control_buttons(false, Some("stopped")),
            ControlButtons {
                start_enabled: true,
                stop_enabled: false
            }
        );
        assert_eq!(
            control_buttons(false, Some("unknown")),
            ControlButtons {
                start_enabled: true,
                stop_enabled: true
            }
        );
        assert_eq!(
            control_buttons(false, None),
            ControlButtons {
                start_enabled: true,
                stop_enabled: true
            }
        );
        for status in [Some("running"), Some("stopped"), Some("unknown"), None] {
            assert_eq!(
                control_buttons(true, status),
                ControlButtons {
                    start_enabled: false,
                    stop_enabled: false
                }
            );
        }
    }

    #[test]
    fn last_update_falls_back_to_na() {
        assert_eq!(last_update(None), "N/A");
        let snap = StatusSnapshot {
            last_update: Some("2026-03-02 14:30:00".into()),
            ..Default::default()
        };
        assert_eq!(last_update(Some(&snap)), "2026-03-02 14:30:00");
    }
}
