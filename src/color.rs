use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.70, 0.55).into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Pie wedge colours, one per slice.
pub fn slice_colors(n: usize) -> Vec<Color32> {
    generate_palette(n, 210.0)
}

// ---------------------------------------------------------------------------
// Category colours: booster version category → Color32
// ---------------------------------------------------------------------------

/// Maps every category of the loaded dataset to a fixed colour, so a
/// category keeps its colour while the controls filter points in and out.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len(), 0.0);
        CategoryColors {
            mapping: categories.iter().cloned().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category; unknown ones are grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
