// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error(transparent)]
    Request(#[from] RequestFailure),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Failure of a single backend call, rendered as the message the panel shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response. `detail` carries the server's `error` field when one was read.
    #[error("{}", server_message(*.status, .detail.as_deref()))]
    Server { status: u16, detail: Option<String> },

    /// 2xx response whose body still reports an error.
    #[error("{0}")]
    Application(String),
}

impl RequestFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestFailure::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn server_message(status: u16, detail: Option<&str>) -> String {
    match detail.map(str::trim).filter(|d| !d.is_empty()) {
        Some(detail) => detail.to_string(),
        None => format!("HTTP error! status: {status}"),
    }
}
