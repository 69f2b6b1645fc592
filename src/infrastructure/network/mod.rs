// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

pub mod api_client;

pub use api_client::{ApiClient, TradingBackend};
