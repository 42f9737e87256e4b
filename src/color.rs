use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct dark colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.45, 0.22);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps each category tab to a distinct background colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Option<String>, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the categories in tab order.
    pub fn new(categories: &[Option<String>]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::BLACK,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: Option<&str>) -> Color32 {
        self.mapping
            .get(&category.map(str::to_string))
            .copied()
            .unwrap_or(self.default_color)
    }
}
