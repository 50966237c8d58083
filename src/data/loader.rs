use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};

use super::model::{CanonicalTable, REQUIRED_COLUMNS};
use super::normalize::{format_base_date, normalize_rows, present, RawRow};
use crate::error::LoadError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Input formats, chosen by file name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Delimited,
}

impl SourceFormat {
    /// `.xlsx` is a spreadsheet; everything else is read as delimited text.
    pub fn from_name(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".xlsx") {
            SourceFormat::Spreadsheet
        } else {
            SourceFormat::Delimited
        }
    }
}

/// Parse an uploaded file into a canonical table.
///
/// Either the whole table is produced or an error is returned; no partial
/// tables.
pub fn load_table(name: &str, bytes: &[u8]) -> Result<CanonicalTable, LoadError> {
    let format = SourceFormat::from_name(name);
    log::info!("Loading {name} ({} bytes) as {format:?}", bytes.len());

    let rows = match format {
        SourceFormat::Spreadsheet => read_xlsx(bytes)?,
        SourceFormat::Delimited => read_delimited(bytes)?,
    };
    let total = rows.len();
    let (records, dropped) = normalize_rows(rows);

    if dropped > 0 {
        log::warn!("{name}: dropped {dropped} of {total} rows with an unparseable base date");
    }
    log::info!("{name}: {} records loaded", records.len());

    Ok(CanonicalTable::new(name, records, dropped))
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

/// Positions of the required columns in a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    fn from_headers(headers: &[&str]) -> Result<Self, LoadError> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, required) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == required)
                .ok_or_else(|| LoadError::MissingColumn(required.to_string()))?;
        }
        Ok(ColumnIndex(positions))
    }

    /// Pick the required cells out of a full row.
    fn raw_row<'a>(&self, cell: impl Fn(usize) -> Option<&'a str>) -> RawRow {
        let [base_date, published, press, link, title, content, summary_title, summary_text, theme] =
            self.0.map(|i| present(cell(i)));
        RawRow {
            base_date,
            published,
            press,
            link,
            title,
            content,
            summary_title,
            summary_text,
            theme,
        }
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Comma-separated text with a header row. A leading UTF-8 BOM is ignored.
fn read_delimited(bytes: &[u8]) -> Result<Vec<RawRow>, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::NoHeader);
    }
    let columns = ColumnIndex::from_headers(&headers.iter().collect::<Vec<_>>())?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(columns.raw_row(|i| record.get(i)));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// First worksheet of an `.xlsx` workbook; first row is the header.
fn read_xlsx(bytes: &[u8]) -> Result<Vec<RawRow>, LoadError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::EmptyWorkbook)??;

    let mut sheet_rows = range.rows();
    let header: Vec<String> = sheet_rows
        .next()
        .ok_or(LoadError::NoHeader)?
        .iter()
        .map(cell_text)
        .collect();
    let columns = ColumnIndex::from_headers(&header.iter().map(String::as_str).collect::<Vec<_>>())?;

    let rows = sheet_rows
        .map(|row| {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            columns.raw_row(|i| cells.get(i).map(String::as_str))
        })
        .collect();
    Ok(rows)
}

/// Cell content as text. Whole floats print without a fraction, so a
/// numeric `20250806` cell reads back as `"20250806"`. Date cells read as
/// `YYYYMMDD`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt| format_base_date(&dt.date()))
            .unwrap_or_default(),
        other => other.to_string(),
    }
}
