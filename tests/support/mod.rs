// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use mnq_control_panel::domain::error::RequestFailure;
use mnq_control_panel::domain::model::{Ack, StatusSnapshot};
use mnq_control_panel::domain::settings::SettingsDocument;
use mnq_control_panel::network::TradingBackend;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// One scripted answer: resolve after `delay` with `result`.
struct Step<T> {
    delay: Duration,
    result: Result<T, RequestFailure>,
}

/// Queue of scripted answers with a fallback once the queue runs dry.
struct Script<T> {
    queue: Mutex<VecDeque<Step<T>>>,
    fallback: Mutex<Result<T, RequestFailure>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new(fallback: Result<T, RequestFailure>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(fallback),
            calls: AtomicUsize::new(0),
        }
    }

    fn push(&self, delay: Duration, result: Result<T, RequestFailure>) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Step { delay, result });
    }

    fn set_fallback(&self, result: Result<T, RequestFailure>) {
        *self.fallback.lock().unwrap() = result;
    }

    async fn next(&self) -> Result<T, RequestFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.queue.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.result
            }
            None => self.fallback.lock().unwrap().clone(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub struct FakeBackend {
    status: Script<StatusSnapshot>,
    start: Script<Ack>,
    stop: Script<Ack>,
    reinit: Script<Ack>,
    settings: Script<SettingsDocument>,
    submit: Script<String>,
    submitted: Mutex<Vec<SettingsDocument>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            status: Script::new(Ok(snapshot("stopped"))),
            start: Script::new(Ok(Ack(json!({"message": "Trading started"})))),
            stop: Script::new(Ok(Ack(json!({"message": "Trading stopped"})))),
            reinit: Script::new(Ok(Ack(json!({"message": "ok"})))),
            settings: Script::new(Ok(sample_settings())),
            submit: Script::new(Ok("Settings updated successfully".to_string())),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn script_status(&self, delay: Duration, result: Result<StatusSnapshot, RequestFailure>) {
        self.status.push(delay, result);
    }

    pub fn set_status(&self, result: Result<StatusSnapshot, RequestFailure>) {
        self.status.set_fallback(result);
    }

    pub fn script_start(&self, delay: Duration, result: Result<Ack, RequestFailure>) {
        self.start.push(delay, result);
    }

    pub fn script_stop(&self, delay: Duration, result: Result<Ack, RequestFailure>) {
        self.stop.push(delay, result);
    }

    pub fn script_reinit(&self, delay: Duration, result: Result<Ack, RequestFailure>) {
        self.reinit.push(delay, result);
    }

    pub fn script_settings(&self, delay: Duration, result: Result<SettingsDocument, RequestFailure>) {
        self.settings.push(delay, result);
    }

    pub fn script_submit(&self, delay: Duration, result: Result<String, RequestFailure>) {
        self.submit.push(delay, result);
    }

    pub fn status_calls(&self) -> usize {
        self.status.calls()
    }

    pub fn start_calls(&self) -> usize {
        self.start.calls()
    }

    pub fn stop_calls(&self) -> usize {
        self.stop.calls()
    }

    pub fn reinit_calls(&self) -> usize {
        self.reinit.calls()
    }

    pub fn submitted(&self) -> Vec<SettingsDocument> {
        self.submitted.lock().unwrap().clone()
    }
}

impl TradingBackend for FakeBackend {
    async fn fetch_status(&self) -> Result<StatusSnapshot, RequestFailure> {
        self.status.next().await
    }

    async fn request_start(&self) -> Result<Ack, RequestFailure> {
        self.start.next().await
    }

    async fn request_stop(&self) -> Result<Ack, RequestFailure> {
        self.stop.next().await
    }

    async fn request_database_reinit(&self) -> Result<Ack, RequestFailure> {
        self.reinit.next().await
    }

    async fn fetch_settings(&self) -> Result<SettingsDocument, RequestFailure> {
        self.settings.next().await
    }

    async fn submit_settings(&self, doc: &SettingsDocument) -> Result<String, RequestFailure> {
        self.submitted.lock().unwrap().push(doc.clone());
        self.submit.next().await
    }
}

pub fn snapshot(status: &str) -> StatusSnapshot {
    StatusSnapshot {
        status: Some(status.to_string()),
        last_update: Some("2026-03-02T14:30:00".to_string()),
        daily_pnl: Some(125.5),
        positions: Vec::new(),
        orders: Vec::new(),
    }
}

pub fn server_error(status: u16) -> RequestFailure {
    RequestFailure::Server {
        status,
        detail: None,
    }
}

pub fn sample_settings() -> SettingsDocument {
    serde_json::from_value(json!({
        "trading": {
            "ticker": "MNQ",
            "exchange": "CME",
            "number_of_contracts": 2,
            "currency": "USD",
            "trading_start_time": "09:30",
            "trading_end_time": "15:45",
            "eod_exit_time": "15:55",
            "timezone": "America/New_York",
            "roll_contract_days_before": 5,
            "resubmit_cancelled_order": true,
            "strategy": "bollinger_rsi"
        },
        "risk_management": {
            "stop_loss_ticks": 40,
            "take_profit_ticks": 80,
            "max_24h_loss_per_contract": 250.0,
            "trading_pause_hours": 24,
            "no_endofday_risk": false
        },
        "market_data": {
            "mnq_tick_size": 0.25,
            "mnq_point_value": 2.0,
            "bar_size": "5 mins",
            "horizon": "1 D"
        },
        "api": {
            "api": "ib",
            "ib_host": "127.0.0.1",
            "ib_client_id": 7,
            "paper_trading": "True",
            "timeout": 30
        },
        "technical_indicators": {
            "bollinger_period": 20,
            "bollinger_std": 2.0,
            "rsi_period": 14,
            "rsi_threshold": 30
        },
        "run": { "log_level": "Info" }
    }))
    .expect("sample settings decode")
}
