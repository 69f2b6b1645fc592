// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::settings::{FieldKind, FieldSpec, SETTINGS_LAYOUT, SectionSpec};
use crate::infrastructure::network::TradingBackend;
use crate::services::settings_form::{FormPhase, ReinitConfirmation, SettingsForm, SettingsView};
use crate::ui::theme::{self, MUTED_TEXT};
use egui::{Color32, RichText};
use tokio::runtime::Handle;

pub fn show<B: TradingBackend>(
    ui: &mut egui::Ui,
    form: &SettingsForm<B>,
    runtime: &Handle,
    pending_reinit: &mut Option<ReinitConfirmation<B>>,
) {
    let view = form.view();

    ui.heading(RichText::new("Settings").size(28.0));
    ui.add_space(8.0);

    if let Some(err) = &view.error {
        theme::banner(ui, theme::ERROR_TEXT, err);
        ui.add_space(6.0);
    }
    if let Some(msg) = &view.success {
        theme::banner(ui, theme::SUCCESS_TEXT, msg);
        ui.add_space(6.0);
    }

    if view.phase == FormPhase::Loading {
        ui.label("Loading settings...");
    } else {
        for section in SETTINGS_LAYOUT {
            show_section(ui, form, &view, section);
            ui.add_space(8.0);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let submitting = view.phase == FormPhase::Submitting;
            let label = if submitting { "Saving..." } else { "Save Settings" };
            if ui
                .add_enabled(
                    !submitting,
                    egui::Button::new(RichText::new(label).strong())
                        .fill(Color32::from_rgb(66, 85, 160)),
                )
                .clicked()
            {
                let form = form.clone();
                runtime.spawn(async move { form.submit().await });
            }
        });
    }

    ui.add_space(16.0);
    theme::card(ui, "Database Management", |ui| {
        ui.colored_label(
            MUTED_TEXT,
            "Reinitialize the database to start fresh. This will delete all existing data and reset PnL",
        );
        let label = if view.reinitializing {
            "Reinitializing..."
        } else {
            "Reinitialize Database"
        };
        let enabled = !view.reinitializing && pending_reinit.is_none();
        if ui
            .add_enabled(
                enabled,
                egui::Button::new(RichText::new(label).strong())
                    .fill(Color32::from_rgb(150, 50, 50)),
            )
            .clicked()
        {
            *pending_reinit = Some(form.begin_reinitialize());
        }
    });
}

fn show_section<B: TradingBackend>(
    ui: &mut egui::Ui,
    form: &SettingsForm<B>,
    view: &SettingsView,
    section: &SectionSpec,
) {
    theme::card(ui, section.title, |ui| {
        egui::Grid::new(("settings_section", section.key))
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for field in section.fields.iter().filter(|f| f.editable) {
                    ui.label(field.label);
                    show_field(ui, form, view, section.key, field);
                    ui.end_row();
                }
            });
    });
}

fn show_field<B: TradingBackend>(
    ui: &mut egui::Ui,
    form: &SettingsForm<B>,
    view: &SettingsView,
    section: &str,
    field: &FieldSpec,
) {
    let current = view.document.display_value(section, field.key);
    match field.kind {
        FieldKind::Text | FieldKind::Number => {
            let mut buffer = current;
            let mut editor = egui::TextEdit::singleline(&mut buffer)
                .id_salt((section, field.key))
                .desired_width(280.0);
            if field.kind == FieldKind::Number {
                editor = editor
                    .font(egui::TextStyle::Monospace)
                    .hint_text("number");
            }
            if ui.add(editor).changed() {
                form.edit(section, field.key, buffer);
            }
        }
        FieldKind::Choice(options) => {
            let selected_label = options
                .iter()
                .find(|(value, _)| *value == current)
                .map(|(_, label)| (*label).to_string())
                .unwrap_or_else(|| current.clone());
            let mut selected = current;
            egui::ComboBox::from_id_salt((section, field.key))
                .selected_text(selected_label)
                .width(280.0)
                .show_ui(ui, |ui| {
                    for (value, label) in options {
                        ui.selectable_value(&mut selected, (*value).to_string(), *label);
                    }
                });
            if selected != view.document.display_value(section, field.key) {
                form.edit(section, field.key, selected);
            }
        }
    }
}
