// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::format::format_loose;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// Fixed options as `(value, label)`.
    Choice(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Hidden fields are carried in the document but have no input.
    pub editable: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn text(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Text,
        editable: true,
    }
}

const fn number(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Number,
        editable: true,
    }
}

const fn choice(
    key: &'static str,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Choice(options),
        editable: true,
    }
}

const fn hidden(key: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label: key,
        kind: FieldKind::Text,
        editable: false,
    }
}

pub const STRATEGY_OPTIONS: &[(&str, &str)] = &[("buy", "Buy"), ("bollinger_rsi", "Bollinger RSI")];
pub const PAPER_TRADING_OPTIONS: &[(&str, &str)] = &[("True", "True"), ("False", "False")];
pub const LOG_LEVEL_OPTIONS: &[(&str, &str)] = &[
    ("Debug", "Debug"),
    ("Info", "Info"),
    ("Warning", "Warning"),
    ("Error", "Error"),
];

/// Sections in display order.
pub const SETTINGS_LAYOUT: &[SectionSpec] = &[
    SectionSpec {
        key: "trading",
        title: "Trading Settings",
        fields: &[
            text("ticker", "Ticker"),
            text("exchange", "Exchange"),
            number("number_of_contracts", "Number of Contracts"),
            text("currency", "Currency"),
            text("trading_start_time", "Trading Start Time"),
            text("trading_end_time", "Trading End Time"),
            text("eod_exit_time", "EOD Exit Time"),
            text("timezone", "Timezone"),
            number("roll_contract_days_before", "Roll Contract Days Before"),
            hidden("resubmit_cancelled_order"),
            choice("strategy", "Strategy", STRATEGY_OPTIONS),
        ],
    },
    SectionSpec {
        key: "risk_management",
        title: "Risk Management",
        fields: &[
            number("stop_loss_ticks", "Stop Loss Ticks"),
            number("take_profit_ticks", "Take Profit Ticks"),
            number("max_24h_loss_per_contract", "Max 24h Loss per Contract"),
            number("trading_pause_hours", "Trading Pause Hours"),
            hidden("no_endofday_risk"),
        ],
    },
    SectionSpec {
        key: "market_data",
        title: "Market Data",
        fields: &[
            number("mnq_tick_size", "MNQ Tick Size"),
            number("mnq_point_value", "MNQ Point Value"),
            text("bar_size", "Bar Size"),
            text("horizon", "Horizon"),
        ],
    },
    SectionSpec {
        key: "api",
        title: "API Settings",
        fields: &[
            hidden("api"),
            text("ib_host", "IB Host"),
            number("ib_client_id", "IB Client ID"),
            choice("paper_trading", "Paper Trading", PAPER_TRADING_OPTIONS),
            number("timeout", "Timeout"),
        ],
    },
    SectionSpec {
        key: "technical_indicators",
        title: "Technical Indicators",
        fields: &[
            number("bollinger_period", "Bollinger Bands Period"),
            number("bollinger_std", "Bollinger Bands Std Dev"),
            number("rsi_period", "RSI Period"),
            number("rsi_threshold", "RSI Threshold"),
        ],
    },
    SectionSpec {
        key: "run",
        title: "Run Settings",
        fields: &[choice("log_level", "Log Level", LOG_LEVEL_OPTIONS)],
    },
];

/// Remote configuration object, section name -> field map.
///
/// Values are kept exactly as the backend sent them; only fields the user edits
/// are replaced, always with a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsDocument {
    sections: BTreeMap<String, Map<String, Value>>,
}

impl Default for SettingsDocument {
    fn default() -> Self {
        let sections = SETTINGS_LAYOUT
            .iter()
            .map(|section| {
                let fields = section
                    .fields
                    .iter()
                    .map(|f| (f.key.to_string(), Value::String(String::new())))
                    .collect();
                (section.key.to_string(), fields)
            })
            .collect();
        Self { sections }
    }
}

impl SettingsDocument {
    pub fn section(&self, section: &str) -> Option<&Map<String, Value>> {
        self.sections.get(section)
    }

    pub fn value(&self, section: &str, field: &str) -> Option<&Value> {
        self.sections.get(section)?.get(field)
    }

    /// Display text of a field; missing and null render empty.
    pub fn display_value(&self, section: &str, field: &str) -> String {
        self.value(section, field)
            .map(format_loose)
            .unwrap_or_default()
    }

    /// Replace one field with the user's text. Siblings are left as they were.
    pub fn set_field(&mut self, section: &str, field: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(field.to_string(), Value::String(value.into()));
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}
