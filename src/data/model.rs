use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const COL_BASE_DATE: &str = "news_bas_dt";
pub const COL_PUBLISHED: &str = "news_cr_pub_date";
pub const COL_PRESS: &str = "news_cr_press";
pub const COL_LINK: &str = "news_link";
pub const COL_TITLE: &str = "news_cr_title";
pub const COL_CONTENT: &str = "news_cr_content";
pub const COL_SUMMARY_TITLE: &str = "news_title_by_agent";
pub const COL_SUMMARY_TEXT: &str = "news_text_by_agent";
pub const COL_THEME: &str = "theme_name";

/// Every column an input file must carry, in canonical output order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_BASE_DATE,
    COL_PUBLISHED,
    COL_PRESS,
    COL_LINK,
    COL_TITLE,
    COL_CONTENT,
    COL_SUMMARY_TITLE,
    COL_SUMMARY_TEXT,
    COL_THEME,
];

// ---------------------------------------------------------------------------
// Missing-value defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_PRESS: &str = "Unknown source";
pub const DEFAULT_LINK: &str = "";
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_CONTENT: &str = "No content";
pub const DEFAULT_SUMMARY_TITLE: &str = "No summary title";
pub const DEFAULT_SUMMARY_TEXT: &str = "No summary";

/// Shown in place of a missing publish timestamp.
pub const NO_TIMESTAMP_LABEL: &str = "No time information";

// ---------------------------------------------------------------------------
// RecordId – stable row identity
// ---------------------------------------------------------------------------

/// Zero-based position of the data row in the uploaded file.
///
/// Survives row dropping: a table built from rows 0, 2, 3 keeps those ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RecordId(pub usize);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ArticleRecord – one row of the canonical table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    pub id: RecordId,
    pub base_date: NaiveDate,
    pub published_at: Option<NaiveDateTime>,
    pub press: String,
    pub link: String,
    pub title: String,
    pub content: String,
    pub summary_title: String,
    pub summary_text: String,
    pub theme: Option<String>,
}

impl ArticleRecord {
    /// Timestamp as shown on a summary card.
    pub fn published_label(&self) -> String {
        match self.published_at {
            Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            None => NO_TIMESTAMP_LABEL.to_string(),
        }
    }

    /// The article URL, or `None` when no link control should be rendered.
    pub fn link_url(&self) -> Option<&str> {
        let link = self.link.trim();
        (!link.is_empty()).then_some(link)
    }

    pub fn theme_label(&self) -> &str {
        self.theme.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// CanonicalTable – the normalized dataset
// ---------------------------------------------------------------------------

/// The normalized table produced from one uploaded file.
///
/// Records stay in source order, so ids are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTable {
    /// File name the table was loaded from (empty for the empty table).
    pub source_name: String,
    pub records: Vec<ArticleRecord>,
    /// Number of source rows dropped for an unparseable base date.
    pub dropped_rows: usize,
}

impl CanonicalTable {
    pub fn new(source_name: impl Into<String>, records: Vec<ArticleRecord>, dropped_rows: usize) -> Self {
        Self {
            source_name: source_name.into(),
            records,
            dropped_rows,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Point lookup by source row identity.
    pub fn get(&self, id: RecordId) -> Option<&ArticleRecord> {
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| &self.records[i])
    }

    /// Earliest and latest base date, or `None` for an empty table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.base_date).min()?;
        let max = self.records.iter().map(|r| r.base_date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn record(id: usize, base_date: NaiveDate, theme: &str) -> ArticleRecord {
        ArticleRecord {
            id: RecordId(id),
            base_date,
            published_at: None,
            press: DEFAULT_PRESS.to_string(),
            link: String::new(),
            title: format!("title {id}"),
            content: format!("content {id}"),
            summary_title: format!("summary title {id}"),
            summary_text: format!("summary {id}"),
            theme: Some(theme.to_string()),
        }
    }

    #[test]
    fn get_finds_records_by_source_position() {
        let table = CanonicalTable::new(
            "news.csv",
            vec![record(0, date(2025, 1, 1), "A"), record(3, date(2025, 1, 2), "B")],
            2,
        );
        assert_eq!(table.get(RecordId(3)).map(|r| r.theme_label()), Some("B"));
        assert!(table.get(RecordId(1)).is_none());
        assert!(table.get(RecordId(99)).is_none());
    }

    #[test]
    fn date_bounds_of_empty_table_is_none() {
        assert_eq!(CanonicalTable::empty().date_bounds(), None);
    }

    #[test]
    fn date_bounds_spans_min_and_max() {
        let table = CanonicalTable::new(
            "news.csv",
            vec![
                record(0, date(2025, 1, 5), "A"),
                record(1, date(2025, 1, 1), "A"),
                record(2, date(2025, 1, 3), "A"),
            ],
            0,
        );
        assert_eq!(table.date_bounds(), Some((date(2025, 1, 1), date(2025, 1, 5))));
    }

    #[test]
    fn empty_link_renders_without_link_control() {
        let mut rec = record(0, date(2025, 1, 1), "A");
        assert_eq!(rec.link_url(), None);
        rec.link = "https://news.example.com/a/1".to_string();
        assert_eq!(rec.link_url(), Some("https://news.example.com/a/1"));
    }

    #[test]
    fn missing_timestamp_has_placeholder_label() {
        let mut rec = record(0, date(2025, 8, 6), "A");
        assert_eq!(rec.published_label(), NO_TIMESTAMP_LABEL);
        rec.published_at = date(2025, 8, 6).and_hms_opt(19, 5, 0);
        assert_eq!(rec.published_label(), "2025-08-06 19:05");
    }
}
