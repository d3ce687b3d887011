//! TTF/OTF text via ab_glyph.
//!
//! Fonts are loaded from files at runtime. Medium weight maps to the
//! regular face; bold uses the bold face when one was given, otherwise the
//! regular face.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use std::path::Path;

use super::{FontSpec, FontWeight, GlyphMask, TextMeasurer, Typeface};
use crate::StudioError;

/// A proportional typeface backed by one or two font files.
#[derive(Clone)]
pub struct TtfTypeface {
    regular: FontArc,
    bold: Option<FontArc>,
}

impl std::fmt::Debug for TtfTypeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfTypeface")
            .field("has_bold", &self.bold.is_some())
            .finish()
    }
}

impl TtfTypeface {
    /// Build from in-memory font data.
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self, StudioError> {
        let regular = FontArc::try_from_vec(regular)
            .map_err(|e| StudioError::Font(format!("Invalid regular font: {}", e)))?;
        let bold = bold
            .map(|data| {
                FontArc::try_from_vec(data)
                    .map_err(|e| StudioError::Font(format!("Invalid bold font: {}", e)))
            })
            .transpose()?;
        Ok(Self { regular, bold })
    }

    /// Load fonts from disk.
    pub fn load(regular: &Path, bold: Option<&Path>) -> Result<Self, StudioError> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|e| {
                StudioError::Font(format!("Failed to read {}: {}", path.display(), e))
            })
        };
        let regular = read(regular)?;
        let bold = bold.map(read).transpose()?;
        Self::from_bytes(regular, bold)
    }

    fn face(&self, weight: FontWeight) -> &FontArc {
        match weight {
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontWeight::Regular | FontWeight::Medium => &self.regular,
        }
    }

    /// ab_glyph scales by line height; convert a CSS em size to that.
    fn px_scale(font: &FontArc, size: f32) -> PxScale {
        let upem = font.units_per_em().unwrap_or(1000.0);
        PxScale::from(size * font.height_unscaled() / upem)
    }
}

impl TextMeasurer for TtfTypeface {
    fn measure(&self, text: &str, spec: FontSpec) -> f32 {
        let font = self.face(spec.weight);
        let scaled = font.as_scaled(Self::px_scale(font, spec.size));
        text.chars()
            .map(|ch| scaled.h_advance(font.glyph_id(ch)))
            .sum()
    }
}

impl Typeface for TtfTypeface {
    fn rasterize(&self, text: &str, spec: FontSpec) -> GlyphMask {
        let font = self.face(spec.weight);
        let scale = Self::px_scale(font, spec.size);
        let scaled = font.as_scaled(scale);

        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            glyphs.push((glyph_id, caret_x));
            caret_x += scaled.h_advance(glyph_id);
        }

        let ascent = scaled.ascent();
        let descent = scaled.descent();
        let width = (caret_x.ceil() as usize).max(1);
        let height = ((ascent - descent).ceil() as usize).max(1);
        let mut mask = GlyphMask::blank(width, height, ascent);

        for (glyph_id, glyph_x) in glyphs {
            let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(glyph_x, ascent));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;
                    mask.add(x, y, coverage);
                });
            }
        }

        mask
    }
}
