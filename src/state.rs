use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::ThemePalette;
use crate::config::ViewerConfig;
use crate::data::cache::LoadCache;
use crate::data::export::export_to_path;
use crate::data::filter::{
    all_indices, run_pipeline, selectable_themes, DateRange, FilterParams, FilteredView, ThemeChoice,
};
use crate::data::model::{ArticleRecord, CanonicalTable, RecordId};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Which date bucket and which single article the user is focused on.
///
/// Both start unset. There is no way to unset the date once chosen; picking
/// another date replaces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_date: Option<NaiveDate>,
    selected_record: Option<RecordId>,
}

impl SelectionState {
    pub fn select_date(&mut self, date: NaiveDate) -> (Option<NaiveDate>, Option<RecordId>) {
        self.selected_date = Some(date);
        self.read()
    }

    pub fn select_record(&mut self, id: RecordId) -> (Option<NaiveDate>, Option<RecordId>) {
        self.selected_record = Some(id);
        self.read()
    }

    pub fn read(&self) -> (Option<NaiveDate>, Option<RecordId>) {
        (self.selected_date, self.selected_record)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_record(&self) -> Option<RecordId> {
        self.selected_record
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full per-session UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Parsed files, memoized by name and content.
    cache: LoadCache,

    /// Currently loaded table (empty until a file loads successfully).
    pub table: Arc<CanonicalTable>,

    /// Earliest and latest base date of `table`.
    pub bounds: Option<(NaiveDate, NaiveDate)>,

    /// Active date range; `None` while the table is empty.
    pub range: Option<DateRange>,

    pub theme: ThemeChoice,

    pub selection: SelectionState,

    /// Output of the last pipeline run (cached).
    pub view: FilteredView,

    /// Colours for every theme in the table.
    pub palette: ThemePalette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            cache: LoadCache::new(config.cache_capacity),
            config,
            table: Arc::new(CanonicalTable::empty()),
            bounds: None,
            range: None,
            theme: ThemeChoice::All,
            selection: SelectionState::default(),
            view: FilteredView::default(),
            palette: ThemePalette::default(),
            status_message: None,
        }
    }

    /// Load an uploaded file. On failure the table becomes empty and the
    /// error is reported once through `status_message`.
    pub fn load_upload(&mut self, name: &str, bytes: &[u8]) {
        match self.cache.load(name, bytes) {
            Ok(table) => {
                self.status_message = (table.dropped_rows > 0).then(|| {
                    format!("{} rows skipped: base date could not be read", table.dropped_rows)
                });
                self.set_table(table);
            }
            Err(e) => self.fail_load(name, &e),
        }
    }

    /// Read a file from disk and load it like an upload.
    pub fn load_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match std::fs::read(path) {
            Ok(bytes) => self.load_upload(&name, &bytes),
            Err(source) => {
                let e = LoadError::Io {
                    path: path.display().to_string(),
                    source,
                };
                self.fail_load(&name, &e);
            }
        }
    }

    fn fail_load(&mut self, name: &str, e: &LoadError) {
        log::error!("Failed to load {name}: {e}");
        self.status_message = Some(format!("Could not read {name}: {e}"));
        self.set_table(Arc::new(CanonicalTable::empty()));
    }

    /// Write the current view to `path` and report the outcome.
    pub fn export_view(&mut self, path: &Path) {
        let result = export_to_path(path, &self.visible_records());
        self.status_message = Some(match result {
            Ok(_) => format!("Exported {} articles to {}", self.view.indices.len(), path.display()),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                format!("Export failed: {e:#}")
            }
        });
    }

    /// Install a table, reset the range to its full span and refilter.
    /// The selection is kept.
    pub fn set_table(&mut self, table: Arc<CanonicalTable>) {
        self.bounds = table.date_bounds();
        self.range = self.bounds.map(|(min, max)| DateRange::new(min, max));
        self.palette = ThemePalette::new(&selectable_themes(&table, &all_indices(&table)));
        self.table = table;
        self.refilter();
    }

    /// Set the date range, clamping both ends into the table's bounds.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let Some((min, max)) = self.bounds else {
            return;
        };
        self.range = Some(DateRange::new(start.clamp(min, max), end.clamp(min, max)));
        self.refilter();
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selection.select_date(date);
        self.refilter();
    }

    pub fn select_theme(&mut self, theme: ThemeChoice) {
        self.theme = theme;
        self.refilter();
    }

    pub fn select_record(&mut self, id: RecordId) {
        self.selection.select_record(id);
    }

    /// The record whose original text is shown, if it exists in the
    /// current table.
    pub fn selected_record(&self) -> Option<&ArticleRecord> {
        self.selection.selected_record().and_then(|id| self.table.get(id))
    }

    /// Records of the current view, in display order.
    pub fn visible_records(&self) -> Vec<&ArticleRecord> {
        self.view
            .indices
            .iter()
            .filter_map(|&i| self.table.records.get(i))
            .collect()
    }

    /// Recompute the view. A theme no longer on offer falls back to "all".
    pub fn refilter(&mut self) {
        let Some(range) = self.range else {
            self.view = FilteredView::default();
            return;
        };
        let mut params = FilterParams {
            range,
            selected_date: self.selection.selected_date(),
            theme: self.theme.clone(),
        };
        let mut view = run_pipeline(&self.table, &params);
        if !view.themes.contains(&params.theme) {
            log::debug!("Theme {} not offered any more; showing all", params.theme);
            params.theme = ThemeChoice::All;
            view = run_pipeline(&self.table, &params);
            self.theme = ThemeChoice::All;
        }
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::{sample_csv, HEADER};
    use crate::data::model::tests::date;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.load_upload("news.csv", sample_csv().as_bytes());
        state
    }

    #[test]
    fn selection_setters_are_idempotent() {
        let mut sel = SelectionState::default();
        assert_eq!(sel.read(), (None, None));
        let once = sel.select_date(date(2025, 1, 2));
        let twice = sel.select_date(date(2025, 1, 2));
        assert_eq!(once, twice);
        assert_eq!(sel.select_record(RecordId(3)), (Some(date(2025, 1, 2)), Some(RecordId(3))));
        assert_eq!(sel.select_record(RecordId(3)), sel.read());
    }

    #[test]
    fn upload_resets_range_to_data_bounds() {
        let state = loaded();
        assert_eq!(state.bounds, Some((date(2025, 1, 1), date(2025, 1, 2))));
        assert_eq!(state.range, Some(DateRange::new(date(2025, 1, 1), date(2025, 1, 2))));
        assert_eq!(state.view.indices.len(), 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn range_is_clamped_to_bounds() {
        let mut state = loaded();
        state.set_range(date(2024, 1, 1), date(2030, 1, 1));
        assert_eq!(state.range, Some(DateRange::new(date(2025, 1, 1), date(2025, 1, 2))));
    }

    #[test]
    fn summaries_are_newest_first() {
        let state = loaded();
        let ids: Vec<RecordId> = state.visible_records().iter().map(|r| r.id).collect();
        // 01-02 14:30, 01-02 08:15, 01-01 09:00
        assert_eq!(ids, vec![RecordId(1), RecordId(2), RecordId(0)]);
    }

    #[test]
    fn selected_date_is_sticky() {
        let mut state = loaded();
        state.select_date(date(2025, 1, 1));
        assert_eq!(state.view.indices.len(), 1);

        state.set_range(date(2025, 1, 2), date(2025, 1, 2));
        assert!(state.view.indices.is_empty());
        assert_eq!(state.view.dates, vec![date(2025, 1, 2)]);
        assert_eq!(state.selection.selected_date(), Some(date(2025, 1, 1)));
    }

    #[test]
    fn theme_missing_from_new_view_falls_back_to_all() {
        let mut state = loaded();
        state.select_theme(ThemeChoice::Named("B".into()));
        assert_eq!(state.view.indices.len(), 1);

        state.select_date(date(2025, 1, 1));
        assert_eq!(state.theme, ThemeChoice::All);
        assert_eq!(state.view.indices.len(), 1);
    }

    #[test]
    fn missing_base_date_column_yields_empty_table_and_one_message() {
        let mut state = loaded();
        let csv = HEADER.replace("news_bas_dt,", "") + "\n2025.01.01. 오전 9:00,p,,t,c,st,sc,A";
        state.load_upload("broken.csv", csv.as_bytes());

        assert!(state.table.is_empty());
        assert!(state.range.is_none());
        assert!(state.view.indices.is_empty());
        let message = state.status_message.as_deref().unwrap();
        assert!(message.contains("news_bas_dt"));
    }

    #[test]
    fn stale_record_selection_shows_nothing() {
        let mut state = loaded();
        state.select_record(RecordId(2));
        assert_eq!(state.selected_record().map(|r| r.id), Some(RecordId(2)));

        let csv = format!("{HEADER}\n20250301,,,,,,,,A");
        state.load_upload("smaller.csv", csv.as_bytes());
        assert!(state.selected_record().is_none());
    }

    #[test]
    fn dropped_rows_are_reported() {
        let mut state = AppState::default();
        let csv = format!("{HEADER}\n20250301,,,,,,,,A\nbad,,,,,,,,A");
        state.load_upload("partial.csv", csv.as_bytes());
        assert_eq!(state.table.len(), 1);
        assert!(state.status_message.as_deref().unwrap().starts_with("1 rows skipped"));
    }

    #[test]
    fn unreadable_path_yields_empty_table_and_one_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded();
        state.load_path(&dir.path().join("missing.csv"));

        assert!(state.table.is_empty());
        assert!(state.view.indices.is_empty());
        assert!(state.status_message.as_deref().unwrap().starts_with("Could not read missing.csv"));
    }

    #[test]
    fn load_path_reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.csv");
        std::fs::write(&path, sample_csv()).unwrap();

        let mut state = AppState::default();
        state.load_path(&path);
        assert_eq!(state.table.len(), 3);
        assert_eq!(state.table.source_name, "news.csv");
    }

    #[test]
    fn export_reports_success_instead_of_clearing_the_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        let csv = format!("{HEADER}\n20250301,,,,,,,,A\nbad,,,,,,,,A");
        state.load_upload("partial.csv", csv.as_bytes());
        assert!(state.status_message.is_some());

        let path = dir.path().join("view.json");
        state.export_view(&path);
        assert!(path.exists());
        assert_eq!(
            state.status_message.as_deref(),
            Some(format!("Exported 1 articles to {}", path.display()).as_str())
        );
    }

    #[test]
    fn failed_export_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded();
        state.export_view(&dir.path().join("no-such-dir").join("view.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Export failed"));
    }

    #[test]
    fn reuploading_the_same_file_reuses_the_table() {
        let mut state = loaded();
        let before = Arc::clone(&state.table);
        state.load_upload("news.csv", sample_csv().as_bytes());
        assert!(Arc::ptr_eq(&before, &state.table));
    }
}
