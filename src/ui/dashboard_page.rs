// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::infrastructure::network::TradingBackend;
use crate::services::poller::{PollPhase, StatusPoller};
use crate::ui::theme::{self, MUTED_TEXT, tone_color};
use crate::ui::view::{
    self, ORDER_COLUMNS, POSITION_COLUMNS, TableBody, control_buttons,
};
use egui::{Color32, RichText};

pub fn show<B: TradingBackend>(ui: &mut egui::Ui, poller: &StatusPoller<B>) {
    let state = poller.state();
    let snapshot = state.snapshot.as_ref();

    if state.phase == PollPhase::Loading && snapshot.is_none() {
        ui.label("Loading...");
        return;
    }

    ui.horizontal(|ui| {
        ui.heading(RichText::new("Dashboard").size(28.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let buttons = control_buttons(state.busy, state.status());
            // right_to_left: Stop is laid out first so Start ends up on the left.
            if ui
                .add_enabled(
                    buttons.stop_enabled,
                    egui::Button::new(RichText::new("Stop Trading").strong())
                        .fill(Color32::from_rgb(120, 56, 56)),
                )
                .clicked()
            {
                poller.stop_trading();
            }
            if ui
                .add_enabled(
                    buttons.start_enabled,
                    egui::Button::new(RichText::new("Start Trading").strong())
                        .fill(Color32::from_rgb(35, 104, 78)),
                )
                .clicked()
            {
                poller.start_trading();
            }
        });
    });
    ui.add_space(8.0);

    if let Some(err) = &state.error {
        theme::banner(ui, theme::ERROR_TEXT, err);
        ui.add_space(8.0);
    }

    let updated = view::last_update(snapshot);
    ui.columns(2, |columns| {
        theme::card(&mut columns[0], "Trading Status", |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Status:").strong());
                theme::badge(ui, &view::status_badge(snapshot));
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new("Last Update:").strong());
                ui.label(updated.as_str());
            });
        });

        theme::card(&mut columns[1], "Daily P&L", |ui| {
            let pnl = view::daily_pnl(snapshot);
            ui.label(
                RichText::new(pnl.text)
                    .size(30.0)
                    .strong()
                    .color(tone_color(pnl.tone)),
            );
            ui.colored_label(MUTED_TEXT, format!("Updated: {updated}"));
        });
    });
    ui.add_space(8.0);

    theme::card(ui, "Positions", |ui| {
        egui::Grid::new("positions_table")
            .striped(true)
            .num_columns(POSITION_COLUMNS.len())
            .min_col_width(120.0)
            .show(ui, |ui| {
                header_row(ui, &POSITION_COLUMNS);
                match view::position_table(snapshot) {
                    TableBody::Rows(rows) => {
                        for row in rows {
                            ui.label(row.symbol);
                            ui.label(row.quantity);
                            ui.label(row.avg_price);
                            ui.end_row();
                        }
                    }
                    TableBody::Placeholder(text) => placeholder_row(ui, text),
                }
            });
    });
    ui.add_space(8.0);

    theme::card(ui, "Recent Orders", |ui| {
        egui::ScrollArea::vertical()
            .id_salt("orders_scroll")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("orders_table")
                    .striped(true)
                    .num_columns(ORDER_COLUMNS.len())
                    .min_col_width(90.0)
                    .show(ui, |ui| {
                        header_row(ui, &ORDER_COLUMNS);
                        match view::order_table(snapshot) {
                            TableBody::Rows(rows) => {
                                for row in rows {
                                    ui.monospace(row.order_id);
                                    ui.label(row.symbol);
                                    ui.label(row.order_type);
                                    ui.colored_label(tone_color(row.action_tone), row.action);
                                    theme::badge(ui, &row.status);
                                    ui.label(row.quantity);
                                    ui.end_row();
                                }
                            }
                            TableBody::Placeholder(text) => placeholder_row(ui, text),
                        }
                    });
            });
    });
}

fn header_row(ui: &mut egui::Ui, columns: &[&str]) {
    for title in columns {
        ui.label(RichText::new(title.to_uppercase()).small().color(MUTED_TEXT));
    }
    ui.end_row();
}

/// Grid has no column span; the text sits in the first cell of an otherwise empty row.
fn placeholder_row(ui: &mut egui::Ui, text: &str) {
    ui.colored_label(MUTED_TEXT, text);
    ui.end_row();
}
