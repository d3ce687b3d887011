//! # Text Measurement and Glyph Rasterization
//!
//! The layout planner never owns a font. It is handed a [`TextMeasurer`],
//! the equivalent of a 2D drawing context's `measureText`. The rasterizer
//! additionally needs coverage masks, so a full [`Typeface`] provides both.
//!
//! | Typeface | Source | Use |
//! |----------|--------|-----|
//! | [`BitmapTypeface`] | Spleen 12×24, built in | Default, offline |
//! | [`TtfTypeface`] | TTF/OTF files via `ab_glyph` | Smooth, proportional text |
//!
//! Font sizes are CSS-style em sizes in pixels (`bold 36px` → size 36).

mod bitmap;
mod ttf;

pub use bitmap::BitmapTypeface;
pub use ttf::TtfTypeface;

/// Font weight as requested by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    /// CSS weight 500, used by footer titles.
    Medium,
    Bold,
}

/// Size and weight of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub fn new(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }

    pub fn bold(size: f32) -> Self {
        Self::new(size, FontWeight::Bold)
    }

    pub fn medium(size: f32) -> Self {
        Self::new(size, FontWeight::Medium)
    }
}

/// Measures the advance width of a single line of text.
pub trait TextMeasurer {
    /// Width in pixels of `text` rendered with `font`.
    fn measure(&self, text: &str, font: FontSpec) -> f32;
}

/// Rendered text as an anti-aliased coverage buffer.
///
/// The buffer covers one line box: `ascent` pixels above the baseline and
/// `height - ascent` below it.
#[derive(Debug, Clone)]
pub struct GlyphMask {
    pub width: usize,
    pub height: usize,
    /// Distance from the top of the mask to the baseline.
    pub ascent: f32,
    /// Coverage values: 0.0 = empty, 1.0 = fully inked.
    pub data: Vec<f32>,
}

impl GlyphMask {
    /// An empty mask of the given size.
    pub fn blank(width: usize, height: usize, ascent: f32) -> Self {
        Self {
            width,
            height,
            ascent,
            data: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Accumulate coverage at a pixel, clamped to 1.0. Out-of-range writes
    /// are dropped.
    #[inline]
    pub fn add(&mut self, x: i32, y: i32, coverage: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.data[idx] = (self.data[idx] + coverage).min(1.0);
        }
    }
}

/// A font that can both measure and rasterize text.
pub trait Typeface: TextMeasurer + Send + Sync {
    /// Rasterize one line of text.
    fn rasterize(&self, text: &str, font: FontSpec) -> GlyphMask;
}
