//! Decorative motion: the ambient glyph field and the finale heart markers.
//!
//! Both are generated once (per mount / per replay for the glyphs, on
//! entering the finale for the hearts) and immutable afterwards. Purely
//! cosmetic; the layer they render into is pointer-transparent.

use super::rng::RandomSource;

/// Number of ambient glyphs per mount.
pub const AMBIENT_COUNT: usize = 20;
/// Heart markers spawned on the finale.
pub const HEART_COUNT: usize = 12;

/// A non-interactive animated glyph contributing ambient motion only.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorativeItem {
    pub id: usize,
    pub glyph: &'static str,
    pub x_pct: f64,
    pub y_pct: f64,
    pub size_px: f64,
    pub delay_s: f64,
    pub duration_s: f64,
}

/// One floating heart on the finale screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartMarker {
    pub id: usize,
    pub x_pct: f64,
}

impl HeartMarker {
    /// Hearts stagger their float animation by spawn order.
    pub fn delay_s(&self) -> f64 {
        self.id as f64 * 0.2
    }
}

/// Generates the ambient glyph field: positions anywhere on screen, sizes
/// 14..34 px, delays 0..5 s, durations 4..10 s.
pub fn generate_items(rng: &mut impl RandomSource) -> Vec<DecorativeItem> {
    (0..AMBIENT_COUNT)
        .map(|id| DecorativeItem {
            id,
            glyph: crate::AMBIENT_GLYPHS[id % crate::AMBIENT_GLYPHS.len()],
            x_pct: rng.range(0.0, 100.0),
            y_pct: rng.range(0.0, 100.0),
            size_px: 14.0 + rng.next_f64() * 20.0,
            delay_s: rng.next_f64() * 5.0,
            duration_s: 4.0 + rng.next_f64() * 6.0,
        })
        .collect()
}

/// Generates the finale hearts, horizontally spread across 10..90%.
pub fn generate_hearts(rng: &mut impl RandomSource) -> Vec<HeartMarker> {
    (0..HEART_COUNT)
        .map(|id| HeartMarker {
            id,
            x_pct: 10.0 + rng.next_f64() * 80.0,
        })
        .collect()
}
