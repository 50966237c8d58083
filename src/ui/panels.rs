use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.view.indices.is_empty();
            if ui.add_enabled(can_export, egui::Button::new("Export view…")).clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.table.is_empty() {
            ui.label(format!(
                "{}: {} articles loaded, {} shown",
                state.table.source_name,
                state.table.len(),
                state.view.indices.len()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Date range controls
// ---------------------------------------------------------------------------

/// Start / end pickers. Both ends are clamped into the data's date span.
pub fn date_range_controls(ui: &mut Ui, state: &mut AppState) {
    let Some(range) = state.range else {
        return;
    };
    let (mut start, mut end) = (range.start, range.end);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Start date");
        let start_changed = ui
            .add(DatePickerButton::new(&mut start).id_salt("range_start"))
            .changed();
        ui.add_space(16.0);
        ui.label("End date");
        let end_changed = ui
            .add(DatePickerButton::new(&mut end).id_salt("range_end"))
            .changed();

        if start_changed || end_changed {
            state.set_range(start, end);
        }
        if let Some((min, max)) = state.bounds {
            ui.add_space(16.0);
            ui.weak(format!("Data covers {} to {}", min.format("%Y-%m-%d"), max.format("%Y-%m-%d")));
        }
    });
}

// ---------------------------------------------------------------------------
// File input
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open news data")
        .add_filter("News data", &["xlsx", "csv"])
        .add_filter("Excel workbook", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

/// Load files dropped onto the window. Only the last one stays loaded.
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    for file in dropped {
        match (&file.bytes, &file.path) {
            (Some(bytes), _) => state.load_upload(&file.name, bytes),
            (None, Some(path)) => state.load_path(path),
            (None, None) => log::warn!("Dropped file {} carries no data", file.name),
        }
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export current view")
        .set_file_name("news_view.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export_view(&path);
    }
}
