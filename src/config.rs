use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming a JSON config file.
pub const CONFIG_PATH_ENV: &str = "NEWS_VIEWER_CONFIG";

/// Environment variable overriding [`ViewerConfig::cache_capacity`].
pub const CACHE_CAPACITY_ENV: &str = "NEWS_VIEWER_CACHE_CAPACITY";

/// Window and cache settings for the viewer shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// How many parsed files the load cache keeps.
    pub cache_capacity: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Height of the scrollable summary and original-article columns.
    pub summary_panel_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 4,
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
            summary_panel_height: 600.0,
        }
    }
}

impl ViewerConfig {
    /// The file named by `NEWS_VIEWER_CONFIG` (or defaults), then the cache
    /// capacity override. A broken file is logged and ignored.
    pub fn from_env() -> Self {
        let base = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path)).unwrap_or_else(|e| {
                log::warn!("Ignoring {CONFIG_PATH_ENV}: {e:#}");
                Self::default()
            }),
            None => Self::default(),
        };
        base.with_cache_capacity(std::env::var(CACHE_CAPACITY_ENV).ok().as_deref())
    }

    /// Read a JSON config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded viewer config from {}", path.display());
        Ok(config)
    }

    fn with_cache_capacity(mut self, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return self;
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => self.cache_capacity = n,
            _ => log::warn!(
                "Ignoring {CACHE_CAPACITY_ENV}={raw:?}; using {}",
                self.cache_capacity
            ),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_override_accepts_positive_integers() {
        assert_eq!(ViewerConfig::default().with_cache_capacity(Some("9")).cache_capacity, 9);
        assert_eq!(ViewerConfig::default().with_cache_capacity(Some(" 2 ")).cache_capacity, 2);
    }

    #[test]
    fn invalid_capacity_falls_back_to_default() {
        let default = ViewerConfig::default().cache_capacity;
        for raw in ["0", "-1", "many", ""] {
            assert_eq!(ViewerConfig::default().with_cache_capacity(Some(raw)).cache_capacity, default);
        }
        assert_eq!(ViewerConfig::default().with_cache_capacity(None).cache_capacity, default);
    }

    #[test]
    fn config_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, r#"{ "cache_capacity": 8, "summary_panel_height": 480.0 }"#).unwrap();

        let cfg = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(cfg.cache_capacity, 8);
        assert_eq!(cfg.summary_panel_height, 480.0);
        assert_eq!(cfg.window_size, ViewerConfig::default().window_size);
    }

    #[test]
    fn broken_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, "{ cache_capacity: ").unwrap();
        assert!(ViewerConfig::from_file(&path).is_err());
        assert!(ViewerConfig::from_file(&dir.path().join("absent.json")).is_err());
    }
}
