use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::filter::ThemeChoice;
use crate::data::model::RecordId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Column 1: dates
// ---------------------------------------------------------------------------

/// One button per date in range, newest first. The chosen date is
/// highlighted; clicking another replaces it.
pub fn dates_column(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dates");
    ui.separator();

    let selected = state.selection.selected_date();
    let mut clicked = None;

    ScrollArea::vertical()
        .id_salt("dates")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for date in &state.view.dates {
                let label = date.format("%Y-%m-%d").to_string();
                let button = egui::Button::new(label).selected(selected == Some(*date));
                if ui.add_sized([ui.available_width(), 28.0], button).clicked() {
                    clicked = Some(*date);
                }
            }
        });

    if let Some(date) = clicked {
        state.select_date(date);
    }
}

// ---------------------------------------------------------------------------
// Column 2: themes
// ---------------------------------------------------------------------------

pub fn themes_column(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Themes");
    ui.separator();

    let mut chosen = None;

    ScrollArea::vertical()
        .id_salt("themes")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for theme in &state.view.themes {
                let text = match theme {
                    ThemeChoice::All => RichText::new(theme.to_string()).strong(),
                    ThemeChoice::Named(name) => {
                        RichText::new(name).color(state.palette.color_for(name))
                    }
                };
                if ui.radio(state.theme == *theme, text).clicked() {
                    chosen = Some(theme.clone());
                }
            }
        });

    if let Some(theme) = chosen {
        state.select_theme(theme);
    }
}

// ---------------------------------------------------------------------------
// Column 3: summaries
// ---------------------------------------------------------------------------

pub fn summaries_column(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("News summaries ({})", state.view.indices.len()));
    ui.separator();

    let mut requested: Option<RecordId> = None;

    ScrollArea::vertical()
        .id_salt("summaries")
        .max_height(state.config.summary_panel_height)
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for rec in state.visible_records() {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui: &mut Ui| {
                        let theme = rec.theme_label();
                        if !theme.is_empty() {
                            ui.label(RichText::new(theme).small().color(state.palette.color_for(theme)));
                        }
                        ui.label(RichText::new(rec.published_label()).italics().weak());
                    });
                    ui.label(RichText::new(&rec.summary_title).strong());
                    ui.label(&rec.summary_text);
                    if ui.button("View original").clicked() {
                        requested = Some(rec.id);
                    }
                });
                ui.add_space(6.0);
            }
        });

    if let Some(id) = requested {
        state.select_record(id);
    }
}

// ---------------------------------------------------------------------------
// Column 4: original article
// ---------------------------------------------------------------------------

pub fn original_column(ui: &mut Ui, state: &AppState) {
    ui.heading("Original article");
    ui.separator();

    ScrollArea::vertical()
        .id_salt("original")
        .max_height(state.config.summary_panel_height)
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.selected_record() {
            Some(rec) => {
                ui.horizontal(|ui: &mut Ui| {
                    ui.strong("Source:");
                    ui.label(&rec.press);
                });
                if let Some(url) = rec.link_url() {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.strong("URL:");
                        ui.hyperlink_to("Original article link", url);
                    });
                }
                ui.add_space(8.0);
                ui.label(RichText::new(&rec.title).heading());
                ui.add_space(4.0);
                ui.label(&rec.content);
            }
            None => {
                ui.label("Click \"View original\" on a summary to show the article here.");
            }
        });
}
