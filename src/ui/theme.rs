// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::ui::view::{Badge, Tone};
use egui::{Color32, RichText};

pub const ERROR_TEXT: Color32 = Color32::from_rgb(220, 95, 95);
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(94, 208, 160);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(150, 160, 175);
pub const CARD_FILL: Color32 = Color32::from_rgb(18, 30, 43);
pub const CARD_STROKE: Color32 = Color32::from_rgb(35, 58, 84);

pub fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Positive => Color32::from_rgb(60, 170, 100),
        Tone::Negative => Color32::from_rgb(210, 80, 80),
        Tone::Warning => Color32::from_rgb(215, 170, 60),
    }
}

pub fn badge(ui: &mut egui::Ui, badge: &Badge) {
    let color = tone_color(badge.tone);
    ui.colored_label(
        color,
        RichText::new(format!("  {}  ", badge.label))
            .strong()
            .background_color(Color32::from_rgba_unmultiplied(
                color.r(),
                color.g(),
                color.b(),
                40,
            )),
    );
}

pub fn card<R>(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::default()
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).size(18.0).strong());
            ui.add_space(6.0);
            add_contents(ui)
        })
        .inner
}

pub fn banner(ui: &mut egui::Ui, color: Color32, text: &str) {
    egui::Frame::default()
        .fill(Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 30))
        .stroke(egui::Stroke::new(1.0, color))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.colored_label(color, text);
        });
}

pub fn configure_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = Color32::from_rgb(10, 16, 24);
    visuals.panel_fill = Color32::from_rgb(12, 20, 30);
    visuals.extreme_bg_color = Color32::from_rgb(8, 13, 20);
    visuals.override_text_color = Some(Color32::from_rgb(224, 232, 242));
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(23, 35, 49);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(34, 53, 72);
    visuals.widgets.active.bg_fill = Color32::from_rgb(40, 63, 88);
    visuals.selection.bg_fill = Color32::from_rgb(45, 109, 185);
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    ctx.set_style(style);
}
