// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::{
    FETCH_SETTINGS_FAILED, REINIT_CONFIRM_PROMPT, REINIT_LOCAL_SUCCESS_TTL,
    REINIT_SUCCESS_MESSAGE, REINIT_SYSTEM_SUCCESS_TTL, SETTINGS_SUCCESS_TTL,
    UPDATE_SETTINGS_FAILED,
};
use crate::domain::settings::SettingsDocument;
use crate::infrastructure::network::TradingBackend;
use crate::services::notifications::{SharedNotices, TransientMessage, visible_text};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Loading,
    Editable,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTimings {
    pub settings_success: Duration,
    pub reinit_local_success: Duration,
    pub reinit_system_success: Duration,
}

impl Default for MessageTimings {
    fn default() -> Self {
        Self {
            settings_success: SETTINGS_SUCCESS_TTL,
            reinit_local_success: REINIT_LOCAL_SUCCESS_TTL,
            reinit_system_success: REINIT_SYSTEM_SUCCESS_TTL,
        }
    }
}

#[derive(Debug, Clone)]
struct FormState {
    phase: FormPhase,
    document: SettingsDocument,
    error: Option<String>,
    success: Option<TransientMessage>,
    reinitializing: bool,
}

/// Point-in-time copy of the form for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub phase: FormPhase,
    pub document: SettingsDocument,
    pub error: Option<String>,
    pub success: Option<String>,
    pub reinitializing: bool,
}

impl SettingsView {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

struct FormInner<B> {
    backend: Arc<B>,
    notices: SharedNotices,
    timings: MessageTimings,
    state: Mutex<FormState>,
}

impl<B> FormInner<B> {
    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Settings page state: one remote document per visit.
pub struct SettingsForm<B> {
    inner: Arc<FormInner<B>>,
}

impl<B> Clone for SettingsForm<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: TradingBackend> SettingsForm<B> {
    /// A form in `Loading` over the blank document. Call [`SettingsForm::load`] next.
    pub fn new(backend: Arc<B>, notices: SharedNotices, timings: MessageTimings) -> Self {
        Self {
            inner: Arc::new(FormInner {
                backend,
                notices,
                timings,
                state: Mutex::new(FormState {
                    phase: FormPhase::Loading,
                    document: SettingsDocument::default(),
                    error: None,
                    success: None,
                    reinitializing: false,
                }),
            }),
        }
    }

    pub async fn load(&self) {
        let result = self.inner.backend.fetch_settings().await;
        let mut state = self.inner.lock();
        match result {
            Ok(document) => {
                tracing::info!(target: "settings", "Settings loaded");
                state.document = document;
            }
            Err(e) => {
                tracing::warn!(target: "settings", error = %e, "Settings load failed");
                state.error = Some(format!("{FETCH_SETTINGS_FAILED}: {e}"));
            }
        }
        state.phase = FormPhase::Editable;
    }

    pub fn edit(&self, section: &str, field: &str, value: impl Into<String>) {
        self.inner.lock().document.set_field(section, field, value);
    }

    /// Send the whole document. Ignored while a submission is outstanding.
    pub async fn submit(&self) {
        let document = {
            let mut state = self.inner.lock();
            if state.phase == FormPhase::Submitting {
                tracing::debug!(target: "settings", "Submit ignored; already submitting");
                return;
            }
            state.phase = FormPhase::Submitting;
            state.error = None;
            state.document.clone()
        };

        tracing::info!(target: "settings", "Submitting settings");
        let result = self.inner.backend.submit_settings(&document).await;

        let mut state = self.inner.lock();
        state.phase = FormPhase::Editable;
        match result {
            Ok(message) => {
                tracing::info!(target: "settings", %message, "Settings saved");
                state.success = Some(TransientMessage::new(
                    message,
                    self.inner.timings.settings_success,
                ));
            }
            Err(e) => {
                tracing::warn!(target: "settings", error = %e, "Settings update failed");
                state.error = Some(format!("{UPDATE_SETTINGS_FAILED}: {e}"));
            }
        }
    }

    /// First step of the destructive reset. Nothing happens until the returned
    /// confirmation is accepted.
    pub fn begin_reinitialize(&self) -> ReinitConfirmation<B> {
        ReinitConfirmation { form: self.clone() }
    }

    async fn reinitialize_confirmed(&self) {
        {
            let mut state = self.inner.lock();
            if state.reinitializing {
                return;
            }
            state.reinitializing = true;
        }

        tracing::warn!(target: "settings", "Reinitializing backend database");
        let result = self.inner.backend.request_database_reinit().await;

        match result {
            Ok(_) => {
                tracing::info!(target: "settings", "Database reinitialized");
                {
                    let mut state = self.inner.lock();
                    state.success = Some(TransientMessage::new(
                        REINIT_SUCCESS_MESSAGE,
                        self.inner.timings.reinit_local_success,
                    ));
                }
                let mut notices = self.inner.notices.lock();
                notices.flash_success(
                    REINIT_SUCCESS_MESSAGE,
                    self.inner.timings.reinit_system_success,
                );
                notices.set_error(None);
            }
            Err(e) => {
                tracing::warn!(target: "settings", error = %e, "Database reinitialization failed");
                self.inner.notices.lock().set_error(Some(e.to_string()));
            }
        }

        self.inner.lock().reinitializing = false;
    }

    pub fn view_at(&self, now: Instant) -> SettingsView {
        let state = self.inner.lock();
        SettingsView {
            phase: state.phase,
            document: state.document.clone(),
            error: state.error.clone(),
            success: visible_text(&state.success, now),
            reinitializing: state.reinitializing,
        }
    }

    pub fn view(&self) -> SettingsView {
        self.view_at(Instant::now())
    }

    pub fn notices(&self) -> &SharedNotices {
        &self.inner.notices
    }
}

/// Pending destructive reset awaiting the user's answer.
#[must_use = "a reinitialization runs only when confirmed"]
pub struct ReinitConfirmation<B> {
    form: SettingsForm<B>,
}

impl<B: TradingBackend> ReinitConfirmation<B> {
    pub const PROMPT: &'static str = REINIT_CONFIRM_PROMPT;

    pub fn prompt(&self) -> &'static str {
        Self::PROMPT
    }

    pub async fn confirm(self) {
        self.form.reinitialize_confirmed().await;
    }

    pub fn cancel(self) {
        tracing::debug!(target: "settings", "Database reinitialization declined");
    }
}
