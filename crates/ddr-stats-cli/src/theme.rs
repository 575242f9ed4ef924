//! Colors for the comparison chart

use ratatui::prelude::Color;

/// Line colors for one player's series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPalette {
    pub max: Color,
    pub avg: Color,
    pub min: Color,
}

/// First player in greens, second in blues
pub const SERIES_PALETTES: [SeriesPalette; 2] = [
    SeriesPalette {
        max: Color::LightGreen,
        avg: Color::Green,
        min: Color::Rgb(0, 100, 0), // dark green
    },
    SeriesPalette {
        max: Color::LightBlue,
        avg: Color::Blue,
        min: Color::Rgb(0, 0, 139), // dark blue
    },
];

/// Title and highlight color
pub const ACCENT: Color = Color::Rgb(255, 102, 170);
/// Main text color
pub const TEXT: Color = Color::Rgb(205, 214, 244);
/// Dimmed text and axis color
pub const SUBTLE: Color = Color::Rgb(147, 153, 178);

/// Palette for the series at `index`
pub fn palette(index: usize) -> SeriesPalette {
    SERIES_PALETTES[index % SERIES_PALETTES.len()]
}
