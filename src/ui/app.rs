// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::app::config::PanelSettings;
use crate::domain::constants::UI_REPAINT_INTERVAL;
use crate::infrastructure::network::TradingBackend;
use crate::services::notifications::SharedNotices;
use crate::services::poller::StatusPoller;
use crate::services::settings_form::{ReinitConfirmation, SettingsForm};
use crate::ui::theme::{self, configure_visuals};
use crate::ui::{dashboard_page, settings_page};
use egui::{Color32, RichText};
use std::sync::Arc;
use tokio::runtime::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Settings,
}

/// The mounted page. Replacing it drops the previous page's state, which tears
/// down its background work.
enum MountedPage<B> {
    Dashboard(StatusPoller<B>),
    Settings {
        form: SettingsForm<B>,
        pending_reinit: Option<ReinitConfirmation<B>>,
    },
}

pub struct ControlPanelApp<B> {
    backend: Arc<B>,
    runtime: Handle,
    settings: PanelSettings,
    notices: SharedNotices,
    page: MountedPage<B>,
}

impl<B: TradingBackend> ControlPanelApp<B> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        backend: Arc<B>,
        runtime: Handle,
        settings: PanelSettings,
    ) -> Self {
        configure_visuals(&cc.egui_ctx);
        let page = MountedPage::Dashboard(StatusPoller::mount(
            Arc::clone(&backend),
            settings.poll_interval(),
            &runtime,
        ));
        Self {
            backend,
            runtime,
            settings,
            notices: SharedNotices::new(),
            page,
        }
    }

    fn current_page(&self) -> Page {
        match self.page {
            MountedPage::Dashboard(_) => Page::Dashboard,
            MountedPage::Settings { .. } => Page::Settings,
        }
    }

    fn navigate(&mut self, target: Page) {
        if self.current_page() == target {
            return;
        }
        tracing::debug!(target: "ui", page = ?target, "Navigating");
        if let MountedPage::Dashboard(poller) = &self.page {
            poller.teardown();
        }
        self.page = match target {
            Page::Dashboard => MountedPage::Dashboard(StatusPoller::mount(
                Arc::clone(&self.backend),
                self.settings.poll_interval(),
                &self.runtime,
            )),
            Page::Settings => {
                let form = SettingsForm::new(
                    Arc::clone(&self.backend),
                    self.notices.clone(),
                    self.settings.message_timings(),
                );
                let loader = form.clone();
                self.runtime.spawn(async move { loader.load().await });
                MountedPage::Settings {
                    form,
                    pending_reinit: None,
                }
            }
        };
    }

    fn show_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label(RichText::new("MNQ Trading").size(22.0).strong());
        ui.add_space(16.0);
        let current = self.current_page();
        for (page, label) in [(Page::Dashboard, "Dashboard"), (Page::Settings, "Settings")] {
            let button = egui::Button::new(RichText::new(label).size(16.0))
                .selected(current == page)
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.navigate(page);
            }
        }
    }

    fn show_notices(&self, ui: &mut egui::Ui) {
        let notices = self.notices.snapshot();
        let mut dismiss = false;
        if let Some(err) = notices.error() {
            ui.horizontal(|ui| {
                ui.colored_label(theme::ERROR_TEXT, err);
                if ui.small_button("x").clicked() {
                    dismiss = true;
                }
            });
        }
        if let Some(msg) = notices.success() {
            theme::banner(ui, theme::SUCCESS_TEXT, &msg);
        }
        if dismiss {
            self.notices.lock().dismiss_error();
        }
    }

    fn show_reinit_dialog(&mut self, ctx: &egui::Context) {
        let MountedPage::Settings { pending_reinit, .. } = &mut self.page else {
            return;
        };
        let Some(prompt) = pending_reinit.as_ref().map(ReinitConfirmation::prompt) else {
            return;
        };

        let mut answer: Option<bool> = None;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(prompt);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add(egui::Button::new("OK").fill(Color32::from_rgb(150, 50, 50)))
                        .clicked()
                    {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        match (answer, pending_reinit.take()) {
            (Some(true), Some(confirmation)) => {
                self.runtime.spawn(confirmation.confirm());
            }
            (Some(false), Some(confirmation)) => confirmation.cancel(),
            (None, pending) => *pending_reinit = pending,
            (Some(_), None) => {}
        }
    }
}

impl<B: TradingBackend> eframe::App for ControlPanelApp<B> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(220.0)
            .show(ctx, |ui| {
                self.show_sidebar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_notices(ui);
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match &mut self.page {
                    MountedPage::Dashboard(poller) => dashboard_page::show(ui, poller),
                    MountedPage::Settings {
                        form,
                        pending_reinit,
                    } => settings_page::show(ui, form, &self.runtime, pending_reinit),
                });
        });

        self.show_reinit_dialog(ctx);

        ctx.request_repaint_after(UI_REPAINT_INTERVAL);
    }
}
