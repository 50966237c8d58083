use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{ArticleRecord, REQUIRED_COLUMNS};
use super::normalize::to_raw;

/// Output formats, chosen by the extension of the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Write records using the source column names and cell formats, so the
/// file loads back into the same records.
pub fn write_csv<W: Write>(out: W, records: &[&ArticleRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(REQUIRED_COLUMNS).context("writing CSV header")?;

    for rec in records {
        let raw = to_raw(rec);
        let cells = [
            raw.base_date,
            raw.published,
            raw.press,
            raw.link,
            raw.title,
            raw.content,
            raw.summary_title,
            raw.summary_text,
            raw.theme,
        ]
        .map(Option::unwrap_or_default);
        writer
            .write_record(&cells)
            .with_context(|| format!("writing CSV row for record {}", rec.id))?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// Pretty-printed JSON array of records.
pub fn write_json<W: Write, T: Serialize>(out: W, records: &[T]) -> Result<()> {
    serde_json::to_writer_pretty(out, records).context("writing JSON")?;
    Ok(())
}

/// Export to `path`; the extension picks the format.
pub fn export_to_path(path: &Path, records: &[&ArticleRecord]) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path);
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let out = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(out, records)?,
        ExportFormat::Json => write_json(out, records)?,
    }
    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(format)
}
