// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::{
    REINITIALIZE_DB_PATH, SETTINGS_PATH, START_PATH, STATUS_PATH, STOP_PATH,
};
use crate::domain::error::{AppError, RequestFailure};
use crate::domain::model::{Ack, StatusSnapshot};
use crate::domain::settings::SettingsDocument;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Remote operations the panel drives. Implemented over HTTP by [`ApiClient`].
pub trait TradingBackend: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = Result<StatusSnapshot, RequestFailure>> + Send;

    fn request_start(&self) -> impl Future<Output = Result<Ack, RequestFailure>> + Send;

    fn request_stop(&self) -> impl Future<Output = Result<Ack, RequestFailure>> + Send;

    fn request_database_reinit(&self) -> impl Future<Output = Result<Ack, RequestFailure>> + Send;

    fn fetch_settings(
        &self,
    ) -> impl Future<Output = Result<SettingsDocument, RequestFailure>> + Send;

    fn submit_settings(
        &self,
        doc: &SettingsDocument,
    ) -> impl Future<Output = Result<String, RequestFailure>> + Send;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(api_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let parsed = Url::parse(api_url.trim())
            .map_err(|e| AppError::Config(format!("Invalid api_url {api_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "api_url must be http(s), got {}",
                parsed.scheme()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Initialization(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        let url = self.url(path);
        tracing::debug!(target: "api", %url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_failure("GET", &url, e))?;
        decode_success(response, "GET", &url).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&SettingsDocument>,
    ) -> Result<T, RequestFailure> {
        let url = self.url(path);
        tracing::debug!(target: "api", %url, "POST");
        let request = match body {
            Some(doc) => self.http.post(&url).json(doc),
            None => self
                .http
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/json"),
        };
        let response = request
            .send()
            .await
            .map_err(|e| transport_failure("POST", &url, e))?;
        decode_success(response, "POST", &url).await
    }
}

impl TradingBackend for ApiClient {
    async fn fetch_status(&self) -> Result<StatusSnapshot, RequestFailure> {
        self.get_json(STATUS_PATH).await
    }

    async fn request_start(&self) -> Result<Ack, RequestFailure> {
        self.post_json::<Value>(START_PATH, None).await.map(Ack)
    }

    async fn request_stop(&self) -> Result<Ack, RequestFailure> {
        self.post_json::<Value>(STOP_PATH, None).await.map(Ack)
    }

    async fn request_database_reinit(&self) -> Result<Ack, RequestFailure> {
        let url = self.url(REINITIALIZE_DB_PATH);
        tracing::debug!(target: "api", %url, "POST");
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| transport_failure("POST", &url, e))?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: a rejected request may still explain itself in `error`.
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            tracing::warn!(target: "api", %url, status = status.as_u16(), "Database reinitialization rejected");
            return Err(RequestFailure::Server {
                status: status.as_u16(),
                detail: error_field(&body),
            });
        }

        let body = response.json::<Value>().await.map_err(|e| {
            tracing::warn!(target: "api", %url, error = %e, "Backend returned invalid JSON");
            RequestFailure::Transport(format!("POST {url} invalid JSON: {e}"))
        })?;
        if let Some(reason) = error_field(&body) {
            tracing::warn!(target: "api", %url, %reason, "Database reinitialization reported an error");
            return Err(RequestFailure::Application(reason));
        }
        Ok(Ack(body))
    }

    async fn fetch_settings(&self) -> Result<SettingsDocument, RequestFailure> {
        self.get_json(SETTINGS_PATH).await
    }

    async fn submit_settings(&self, doc: &SettingsDocument) -> Result<String, RequestFailure> {
        let body: Value = self.post_json(SETTINGS_PATH, Some(doc)).await?;
        Ok(message_from_body(body))
    }
}

async fn decode_success<T: DeserializeOwned>(
    response: Response,
    method: &str,
    url: &str,
) -> Result<T, RequestFailure> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(target: "api", %method, %url, status = status.as_u16(), "Backend returned failure status");
        return Err(RequestFailure::Server {
            status: status.as_u16(),
            detail: None,
        });
    }
    response.json::<T>().await.map_err(|e| {
        tracing::warn!(target: "api", %method, %url, error = %e, "Backend returned invalid JSON");
        RequestFailure::Transport(format!("{method} {url} invalid JSON: {e}"))
    })
}

fn transport_failure(method: &str, url: &str, err: reqwest::Error) -> RequestFailure {
    tracing::warn!(target: "api", %method, %url, error = %err, "Request failed");
    RequestFailure::Transport(format!("{method} {url} failed: {err}"))
}

fn error_field(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Settings updates answer with a bare string or `{"message": ...}`.
pub fn message_from_body(body: Value) -> String {
    match body {
        Value::String(s) => s,
        Value::Object(ref map) => match map.get("message").and_then(Value::as_str) {
            Some(msg) => msg.to_string(),
            None => body.to_string(),
        },
        other => other.to_string(),
    }
}
