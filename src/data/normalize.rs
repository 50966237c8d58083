use chrono::{NaiveDate, NaiveDateTime};

use super::model::{
    ArticleRecord, RecordId, DEFAULT_CONTENT, DEFAULT_LINK, DEFAULT_PRESS, DEFAULT_SUMMARY_TEXT,
    DEFAULT_SUMMARY_TITLE, DEFAULT_TITLE,
};

/// Format of the base-date column.
pub const BASE_DATE_FORMAT: &str = "%Y%m%d";

/// Format of the publish timestamp once locale markers are translated.
/// Example: `2025.08.06. AM 7:14`.
pub const PUBLISHED_FORMAT: &str = "%Y.%m.%d. %p %I:%M";

/// Locale half-day markers and their English equivalents.
const MERIDIEM_TOKENS: [(&str, &str); 2] = [("오전", "AM"), ("오후", "PM")];

// ---------------------------------------------------------------------------
// RawRow – one source row before normalization
// ---------------------------------------------------------------------------

/// Cell text for the required columns of one source row.
/// `None` marks a missing cell (absent, blank or an NA token).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub base_date: Option<String>,
    pub published: Option<String>,
    pub press: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary_title: Option<String>,
    pub summary_text: Option<String>,
    pub theme: Option<String>,
}

/// Cell texts that spreadsheet and CSV exports use for "no value".
pub const NA_TOKENS: [&str; 19] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "NaT",
];

/// Treat empty, whitespace-only and NA-token cells as missing.
pub fn present(cell: Option<&str>) -> Option<String> {
    cell.filter(|s| {
        let s = s.trim();
        !s.is_empty() && !NA_TOKENS.iter().any(|na| *na == s)
    })
    .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Parse an 8-digit `YYYYMMDD` date. Anything else is `None`.
pub fn parse_base_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, BASE_DATE_FORMAT).ok()
}

/// Replace locale AM/PM markers with `AM` / `PM`.
pub fn translate_meridiem(raw: &str) -> String {
    MERIDIEM_TOKENS
        .iter()
        .fold(raw.to_string(), |acc, (local, english)| acc.replace(local, english))
}

/// Parse a publish timestamp such as `2025.08.06. 오후 3:05`.
pub fn parse_published(raw: &str) -> Option<NaiveDateTime> {
    let translated = translate_meridiem(raw.trim());
    NaiveDateTime::parse_from_str(&translated, PUBLISHED_FORMAT).ok()
}

/// Render a timestamp back into the source format (English markers).
pub fn format_published(ts: &NaiveDateTime) -> String {
    ts.format(PUBLISHED_FORMAT).to_string()
}

pub fn format_base_date(date: &NaiveDate) -> String {
    date.format(BASE_DATE_FORMAT).to_string()
}

fn or_default(cell: Option<String>, default: &str) -> String {
    cell.unwrap_or_else(|| default.to_string())
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

/// Normalize one source row at position `row`.
///
/// Returns `None` when the base date does not parse; the row is dropped.
/// An unparseable timestamp only nulls that field.
pub fn normalize_row(row: usize, raw: RawRow) -> Option<ArticleRecord> {
    let base_date = raw.base_date.as_deref().and_then(parse_base_date)?;
    let published_at = raw.published.as_deref().and_then(parse_published);

    Some(ArticleRecord {
        id: RecordId(row),
        base_date,
        published_at,
        press: or_default(raw.press, DEFAULT_PRESS),
        link: or_default(raw.link, DEFAULT_LINK),
        title: or_default(raw.title, DEFAULT_TITLE),
        content: or_default(raw.content, DEFAULT_CONTENT),
        summary_title: or_default(raw.summary_title, DEFAULT_SUMMARY_TITLE),
        summary_text: or_default(raw.summary_text, DEFAULT_SUMMARY_TEXT),
        theme: raw.theme,
    })
}

/// Normalize all rows, returning the records and the number dropped.
pub fn normalize_rows(rows: impl IntoIterator<Item = RawRow>) -> (Vec<ArticleRecord>, usize) {
    let mut records = Vec::new();
    let mut dropped = 0;
    for (i, raw) in rows.into_iter().enumerate() {
        match normalize_row(i, raw) {
            Some(rec) => records.push(rec),
            None => dropped += 1,
        }
    }
    (records, dropped)
}

/// Turn a record back into source cells. Feeding the result through
/// [`normalize_row`] with the same position yields the same record.
pub fn to_raw(record: &ArticleRecord) -> RawRow {
    RawRow {
        base_date: Some(format_base_date(&record.base_date)),
        published: record.published_at.as_ref().map(format_published),
        press: present(Some(record.press.as_str())),
        link: present(Some(record.link.as_str())),
        title: present(Some(record.title.as_str())),
        content: present(Some(record.content.as_str())),
        summary_title: present(Some(record.summary_title.as_str())),
        summary_text: present(Some(record.summary_text.as_str())),
        theme: record.theme.clone(),
    }
}
