// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// A message that disappears once its deadline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl TransientMessage {
    pub fn new(text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

pub fn visible_text(message: &Option<TransientMessage>, now: Instant) -> Option<String> {
    message
        .as_ref()
        .filter(|m| m.is_visible_at(now))
        .map(|m| m.text.clone())
}

/// Page-level banners shared by every page.
#[derive(Debug, Clone, Default)]
pub struct SystemNotices {
    error: Option<String>,
    success: Option<TransientMessage>,
}

impl SystemNotices {
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn flash_success(&mut self, text: impl Into<String>, ttl: Duration) {
        self.success = Some(TransientMessage::new(text, ttl));
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_at(&self, now: Instant) -> Option<String> {
        visible_text(&self.success, now)
    }

    pub fn success(&self) -> Option<String> {
        self.success_at(Instant::now())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

/// Handle passed explicitly to every page that reports page-level outcomes.
#[derive(Debug, Clone, Default)]
pub struct SharedNotices(Arc<Mutex<SystemNotices>>);

impl SharedNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, SystemNotices> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> SystemNotices {
        self.lock().clone()
    }
}
