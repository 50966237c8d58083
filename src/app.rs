use eframe::egui;
use egui_extras::{Size, StripBuilder};

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{columns, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NewsViewerApp {
    pub state: AppState,
}

impl NewsViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for NewsViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_dropped_files(ctx, &mut self.state);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if self.state.table.is_empty() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open or drop an .xlsx or .csv file to view news data  (File → Open…)");
                });
            });
            return;
        }

        // ---- Header: title and date range ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Theme-based News Summaries");
            });
            ui.add_space(4.0);
            panels::date_range_controls(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // ---- Bottom panel: raw table ----
        egui::TopBottomPanel::bottom("raw_table")
            .resizable(true)
            .default_height(220.0)
            .show(ctx, |ui| {
                table::raw_table(ui, &self.state.table);
            });

        // ---- Central panel: dates | themes | summaries | original ----
        egui::CentralPanel::default().show(ctx, |ui| {
            StripBuilder::new(ui)
                .size(Size::relative(0.15))
                .size(Size::relative(0.15))
                .size(Size::relative(0.35))
                .size(Size::remainder())
                .horizontal(|mut strip| {
                    strip.cell(|ui| columns::dates_column(ui, &mut self.state));
                    strip.cell(|ui| columns::themes_column(ui, &mut self.state));
                    strip.cell(|ui| columns::summaries_column(ui, &mut self.state));
                    strip.cell(|ui| columns::original_column(ui, &self.state));
                });
        });
    }
}
