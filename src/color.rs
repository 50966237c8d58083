use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::filter::ThemeChoice;

// ---------------------------------------------------------------------------
// Theme colours
// ---------------------------------------------------------------------------

/// Golden angle, in degrees.
const HUE_STEP: f32 = 137.508;

/// Text colour for the `i`-th theme in sorted order. Lightness alternates
/// between neighbours.
pub fn theme_color(i: usize) -> Color32 {
    let hue = (i as f32 * HUE_STEP) % 360.0;
    let lightness = if i % 2 == 0 { 0.40 } else { 0.50 };
    let rgb: Srgb = Hsl::new(hue, 0.70, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Theme chips: theme label → Color32
// ---------------------------------------------------------------------------

/// Assigns each theme of the loaded table a stable colour.
#[derive(Debug, Clone, Default)]
pub struct ThemePalette {
    mapping: BTreeMap<String, Color32>,
}

impl ThemePalette {
    /// Build from the full theme list (the "all" sentinel is skipped).
    pub fn new(themes: &[ThemeChoice]) -> Self {
        let mapping = themes
            .iter()
            .filter_map(|t| match t {
                ThemeChoice::Named(name) => Some(name.clone()),
                ThemeChoice::All => None,
            })
            .enumerate()
            .map(|(i, name)| (name, theme_color(i)))
            .collect();
        ThemePalette { mapping }
    }

    pub fn color_for(&self, theme: &str) -> Color32 {
        self.mapping.get(theme).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbouring_theme_colours_differ() {
        for i in 0..20 {
            assert_ne!(theme_color(i), theme_color(i + 1));
        }
    }

    #[test]
    fn themes_get_distinct_colours_and_unknown_is_gray() {
        let palette = ThemePalette::new(&[
            ThemeChoice::All,
            ThemeChoice::Named("Batteries".into()),
            ThemeChoice::Named("Semiconductors".into()),
        ]);
        assert_ne!(palette.color_for("Batteries"), palette.color_for("Semiconductors"));
        assert_eq!(palette.color_for("Shipping"), Color32::GRAY);
    }
}
