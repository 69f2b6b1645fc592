// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::{
    DEFAULT_API_URL, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL, REINIT_LOCAL_SUCCESS_TTL,
    REINIT_SYSTEM_SUCCESS_TTL, SETTINGS_SUCCESS_TTL,
};
use crate::domain::error::AppError;
use crate::services::settings_form::MessageTimings;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

const DEFAULT_CONFIG_FILE: &str = "panel.toml";
const ENV_PREFIX: &str = "MNQ_PANEL";

/// Command-line values that win over file and environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PanelSettings {
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Unset means the HTTP transport's own default applies.
    pub request_timeout_ms: Option<u64>,

    // Feedback messages
    #[serde(default = "default_settings_success_ms")]
    pub settings_success_ms: u64,
    #[serde(default = "default_reinit_local_success_ms")]
    pub reinit_local_success_ms: u64,
    #[serde(default = "default_reinit_system_success_ms")]
    pub reinit_system_success_ms: u64,

    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_false")]
    pub log_json: bool,
}

// Defaults
fn default_debug() -> bool {
    false
}
fn default_false() -> bool {
    false
}
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}
fn default_settings_success_ms() -> u64 {
    SETTINGS_SUCCESS_TTL.as_millis() as u64
}
fn default_reinit_local_success_ms() -> u64 {
    REINIT_LOCAL_SUCCESS_TTL.as_millis() as u64
}
fn default_reinit_system_success_ms() -> u64 {
    REINIT_SYSTEM_SUCCESS_TTL.as_millis() as u64
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            debug: default_debug(),
            api_url: default_api_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: None,
            settings_success_ms: default_settings_success_ms(),
            reinit_local_success_ms: default_reinit_local_success_ms(),
            reinit_system_success_ms: default_reinit_system_success_ms(),
            log_level: default_log_level(),
            log_json: default_false(),
        }
    }
}

impl PanelSettings {
    /// Precedence: CLI (applied in main) > `MNQ_PANEL_*` env / .env > config file.
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        match path {
            Some(selected) => {
                builder = builder.add_source(File::from(Path::new(selected)).required(true));
            }
            None => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        // Validated by `resolve` once command-line overrides are in.
        Ok(builder.build()?.try_deserialize()?)
    }

    /// File and environment, then `overrides`, then validation.
    pub fn resolve(path: Option<&str>, overrides: Overrides) -> Result<Self, AppError> {
        let mut settings = Self::load_with_path(path)?;
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if let Some(ms) = overrides.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self.log_json |= overrides.json_logs;
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(self.api_url.trim())
            .map_err(|e| AppError::Config(format!("api_url {:?} is invalid: {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "api_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(AppError::Config("log_level must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms).max(MIN_POLL_INTERVAL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn message_timings(&self) -> MessageTimings {
        MessageTimings {
            settings_success: Duration::from_millis(self.settings_success_ms.max(1)),
            reinit_local_success: Duration::from_millis(self.reinit_local_success_ms.max(1)),
            reinit_system_success: Duration::from_millis(self.reinit_system_success_ms.max(1)),
        }
    }

    /// Level handed to the subscriber; `debug = true` wins over a plain level.
    pub fn effective_log_level(&self) -> String {
        if self.debug && !self.log_level.contains(['=', ',']) {
            "debug".to_string()
        } else {
            self.log_level.clone()
        }
    }
}
