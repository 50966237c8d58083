use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CanonicalTable, REQUIRED_COLUMNS};

const ROW_HEIGHT: f32 = 18.0;

/// Raw dump of the whole loaded table, one line per record.
pub fn raw_table(ui: &mut Ui, table: &CanonicalTable) {
    ui.strong(format!("Uploaded data ({} rows)", table.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .column(Column::auto().at_least(40.0))
        .columns(Column::initial(140.0).at_least(60.0).clip(true), REQUIRED_COLUMNS.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.len(), |mut row| {
                let rec = &table.records[row.index()];
                row.col(|ui| {
                    ui.label(rec.id.to_string());
                });
                let cells = [
                    rec.base_date.format("%Y-%m-%d").to_string(),
                    rec.published_at
                        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_default(),
                    rec.press.clone(),
                    rec.link.clone(),
                    rec.title.clone(),
                    rec.content.clone(),
                    rec.summary_title.clone(),
                    rec.summary_text.clone(),
                    rec.theme_label().to_string(),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.add(egui::Label::new(cell).truncate());
                    });
                }
            });
        });
}
