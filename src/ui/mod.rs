// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

pub mod app;
pub mod dashboard_page;
pub mod settings_page;
pub mod theme;
pub mod view;

pub use app::ControlPanelApp;
