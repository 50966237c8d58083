use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use super::model::{ArticleRecord, CanonicalTable};

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` range of base dates. `start > end` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Theme selection: the "all" sentinel or one exact label.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeChoice {
    #[default]
    All,
    Named(String),
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeChoice::All => write!(f, "All"),
            ThemeChoice::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Everything one recompute of the view depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub range: DateRange,
    pub selected_date: Option<NaiveDate>,
    pub theme: ThemeChoice,
}

// ---------------------------------------------------------------------------
// Narrowing stages
//
// Each stage takes row indices into the table and returns the subset that
// passes, preserving order.
// ---------------------------------------------------------------------------

/// Indices of every record, in table order.
pub fn all_indices(table: &CanonicalTable) -> Vec<usize> {
    (0..table.len()).collect()
}

fn retain(table: &CanonicalTable, indices: &[usize], keep: impl Fn(&ArticleRecord) -> bool) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| table.records.get(i).is_some_and(&keep))
        .collect()
}

/// Stage 1: base date within the inclusive range.
pub fn by_date_range(table: &CanonicalTable, indices: &[usize], range: DateRange) -> Vec<usize> {
    retain(table, indices, |r| range.contains(r.base_date))
}

/// Stage 2: base date equal to the selected date, if one is set.
pub fn by_selected_date(table: &CanonicalTable, indices: &[usize], selected: Option<NaiveDate>) -> Vec<usize> {
    match selected {
        Some(date) => retain(table, indices, |r| r.base_date == date),
        None => indices.to_vec(),
    }
}

/// Stage 3: exact, case-sensitive theme match unless the choice is "all".
pub fn by_theme(table: &CanonicalTable, indices: &[usize], theme: &ThemeChoice) -> Vec<usize> {
    match theme {
        ThemeChoice::All => indices.to_vec(),
        ThemeChoice::Named(name) => retain(table, indices, |r| r.theme.as_deref() == Some(name.as_str())),
    }
}

// ---------------------------------------------------------------------------
// Derived lists
// ---------------------------------------------------------------------------

/// Distinct base dates, most recent first.
pub fn selectable_dates(table: &CanonicalTable, indices: &[usize]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = indices
        .iter()
        .filter_map(|&i| table.records.get(i))
        .map(|r| r.base_date)
        .collect();
    dates.into_iter().rev().collect()
}

/// "All" followed by the distinct theme labels in ascending order.
/// Records without a theme contribute nothing.
pub fn selectable_themes(table: &CanonicalTable, indices: &[usize]) -> Vec<ThemeChoice> {
    let names: BTreeSet<&str> = indices
        .iter()
        .filter_map(|&i| table.records.get(i))
        .filter_map(|r| r.theme.as_deref())
        .collect();
    std::iter::once(ThemeChoice::All)
        .chain(names.into_iter().map(|n| ThemeChoice::Named(n.to_string())))
        .collect()
}

// ---------------------------------------------------------------------------
// Display ordering
// ---------------------------------------------------------------------------

/// Newest publish timestamp first; records without one go last.
/// The sort is stable, so ties keep table order.
pub fn sort_by_published_desc(table: &CanonicalTable, indices: &mut [usize]) {
    indices.sort_by(|&a, &b| {
        let ta = table.records.get(a).and_then(|r| r.published_at);
        let tb = table.records.get(b).and_then(|r| r.published_at);
        match (ta, tb) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

/// Result of running the pipeline once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    /// Dates offered for single-date selection (after the range stage).
    pub dates: Vec<NaiveDate>,
    /// Themes offered for selection (after the range and date stages).
    pub themes: Vec<ThemeChoice>,
    /// Records to display, in display order.
    pub indices: Vec<usize>,
}

/// range → selected date → theme, then sort for display.
pub fn run_pipeline(table: &CanonicalTable, params: &FilterParams) -> FilteredView {
    let in_range = by_date_range(table, &all_indices(table), params.range);
    let dates = selectable_dates(table, &in_range);

    let on_date = by_selected_date(table, &in_range, params.selected_date);
    let themes = selectable_themes(table, &on_date);

    let mut indices = by_theme(table, &on_date, &params.theme);
    sort_by_published_desc(table, &mut indices);

    FilteredView { dates, themes, indices }
}
