// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

//! Dashboard data-refresh loop.
//!
//! A [`StatusPoller`] lives exactly as long as the dashboard page. Mounting it fetches
//! status immediately and then on a fixed interval; every tick's fetch runs as its own
//! task, so a slow backend can produce overlapping requests. Each fetch carries a
//! sequence number and a response older than the last applied one is dropped.
//! Teardown cancels the loop; responses still in flight afterwards are ignored.

use crate::domain::model::StatusSnapshot;
use crate::infrastructure::network::TradingBackend;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingCommand {
    Start,
    Stop,
}

impl TradingCommand {
    fn label(self) -> &'static str {
        match self {
            TradingCommand::Start => "start",
            TradingCommand::Stop => "stop",
        }
    }
}

/// What the dashboard renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub phase: PollPhase,
    pub snapshot: Option<StatusSnapshot>,
    pub error: Option<String>,
    pub busy: bool,
    applied_seq: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            phase: PollPhase::Loading,
            snapshot: None,
            error: None,
            busy: false,
            applied_seq: 0,
        }
    }
}

impl DashboardState {
    pub fn status(&self) -> Option<&str> {
        self.snapshot.as_ref().and_then(StatusSnapshot::status)
    }
}

struct PollerInner<B> {
    backend: Arc<B>,
    state: Mutex<DashboardState>,
    shutdown: CancellationToken,
    issued_seq: AtomicU64,
}

impl<B: TradingBackend> PollerInner<B> {
    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn refresh(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        let seq = self.issued_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let result = self.backend.fetch_status().await;

        if self.shutdown.is_cancelled() {
            tracing::trace!(target: "poller", seq, "Dropping status response after teardown");
            return;
        }

        let mut state = self.lock();
        state.phase = PollPhase::Ready;
        if seq < state.applied_seq {
            tracing::debug!(target: "poller", seq, applied = state.applied_seq, "Discarding stale status response");
            return;
        }
        state.applied_seq = seq;
        match result {
            Ok(snapshot) => {
                tracing::trace!(target: "poller", seq, status = ?snapshot.status, "Status refreshed");
                state.snapshot = Some(snapshot);
                state.error = None;
            }
            Err(e) => {
                tracing::warn!(target: "poller", seq, error = %e, "Status fetch failed; keeping last snapshot");
                state.error = Some(e.to_string());
            }
        }
    }

    async fn run_command(&self, command: TradingCommand) {
        {
            let mut state = self.lock();
            if state.busy {
                tracing::debug!(target: "poller", command = command.label(), "Ignoring command while busy");
                return;
            }
            state.busy = true;
        }

        let outcome = match command {
            TradingCommand::Start => self.backend.request_start().await,
            TradingCommand::Stop => self.backend.request_stop().await,
        };

        match outcome {
            Ok(ack) => {
                tracing::info!(
                    target: "poller",
                    command = command.label(),
                    message = ack.message().unwrap_or(""),
                    "Trading command accepted"
                );
                self.refresh().await;
            }
            Err(e) => {
                tracing::warn!(target: "poller", command = command.label(), error = %e, "Trading command failed");
                if !self.shutdown.is_cancelled() {
                    self.lock().error = Some(e.to_string());
                }
            }
        }

        self.lock().busy = false;
    }

    async fn poll_loop(self: Arc<Self>, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    tracing::debug!(target: "poller", "Status polling stopped");
                    return;
                }
                _ = ticker.tick() => {
                    let inner = Arc::clone(&self);
                    tokio::spawn(async move { inner.refresh().await });
                }
            }
        }
    }
}

/// Status polling bound to the dashboard page. Dropping it tears the loop down.
pub struct StatusPoller<B> {
    inner: Arc<PollerInner<B>>,
    runtime: Handle,
}

impl<B: TradingBackend> StatusPoller<B> {
    /// Enter `Loading` and start polling on `runtime`. The first fetch is issued
    /// right away, then one per `period`.
    pub fn mount(backend: Arc<B>, period: Duration, runtime: &Handle) -> Self {
        let inner = Arc::new(PollerInner {
            backend,
            state: Mutex::new(DashboardState::default()),
            shutdown: CancellationToken::new(),
            issued_seq: AtomicU64::new(0),
        });
        tracing::debug!(target: "poller", period_ms = period.as_millis() as u64, "Status polling started");
        runtime.spawn(Arc::clone(&inner).poll_loop(period));
        Self {
            inner,
            runtime: runtime.clone(),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.inner.lock().clone()
    }

    pub fn start_trading(&self) -> JoinHandle<()> {
        self.command(TradingCommand::Start)
    }

    pub fn stop_trading(&self) -> JoinHandle<()> {
        self.command(TradingCommand::Stop)
    }

    pub fn command(&self, command: TradingCommand) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        self.runtime
            .spawn(async move { inner.run_command(command).await })
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    /// Stop polling. Safe to call more than once; only the first call cancels.
    pub fn teardown(&self) {
        if !self.inner.shutdown.is_cancelled() {
            self.inner.shutdown.cancel();
            tracing::debug!(target: "poller", "Dashboard torn down");
        }
    }
}

impl<B> Drop for StatusPoller<B> {
    fn drop(&mut self) {
        self.inner.shutdown.cancel();
    }
}
