// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use mnq_control_panel::app::config::{Overrides, PanelSettings};
use mnq_control_panel::app::logging::setup_logging;
use mnq_control_panel::domain::error::AppError;
use mnq_control_panel::network::ApiClient;
use mnq_control_panel::ui::ControlPanelApp;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "MNQ trading control panel")]
struct Cli {
    /// Path to config file (default: panel.toml when present)
    #[arg(long)]
    config: Option<String>,

    /// Backend API base URL (overrides config/env)
    #[arg(long)]
    api_url: Option<String>,

    /// Status poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Log level or full filter directive
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let settings = PanelSettings::resolve(
        cli.config.as_deref(),
        Overrides {
            api_url: cli.api_url,
            poll_interval_ms: cli.poll_interval_ms,
            log_level: cli.log_level,
            json_logs: cli.json_logs,
        },
    )?;

    setup_logging(&settings.effective_log_level(), settings.log_json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("panel-io")
        .build()
        .map_err(|e| AppError::Initialization(format!("tokio runtime: {e}")))?;

    let client = {
        // reqwest wants a runtime context when the client is built.
        let _guard = runtime.enter();
        Arc::new(ApiClient::new(&settings.api_url, settings.request_timeout())?)
    };
    tracing::info!(
        api = client.base_url(),
        poll_ms = settings.poll_interval().as_millis() as u64,
        "Starting control panel"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("MNQ Trading Control Panel")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    let result = eframe::run_native(
        "MNQ Trading Control Panel",
        options,
        Box::new(move |cc| Ok(Box::new(ControlPanelApp::new(cc, client, handle, settings)))),
    );

    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
    result.map_err(|e| AppError::Initialization(format!("UI: {e}")))
}
