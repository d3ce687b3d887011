//! Built-in bitmap typeface.
//!
//! Uses the Spleen 12×24 font scaled to the requested size. Every glyph
//! advances by half the font size, so measurement is exact and
//! platform-independent. Bold is synthesized by smearing each glyph one
//! source column to the right.

use spleen_font::{FONT_12X24, PSF2Font};

use super::{FontSpec, FontWeight, GlyphMask, TextMeasurer, Typeface};
use crate::StudioError;

const CELL_W: usize = 12;
const CELL_H: usize = 24;
/// Baseline row within the 24-row Spleen cell.
const BASELINE_ROW: f32 = 19.0;
/// Samples per axis when scaling a cell (SS×SS per output pixel).
const SS: usize = 3;

/// Monospace typeface backed by the embedded Spleen font.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapTypeface;

impl BitmapTypeface {
    /// Check that the embedded font parses.
    pub fn new() -> Result<Self, StudioError> {
        Self::font()?;
        Ok(Self)
    }

    fn font() -> Result<PSF2Font<'static>, StudioError> {
        PSF2Font::new(FONT_12X24)
            .map_err(|e| StudioError::Font(format!("Embedded Spleen font failed to parse: {}", e)))
    }

    /// Advance width of one character at `size`.
    pub fn advance(size: f32) -> f32 {
        size * CELL_W as f32 / CELL_H as f32
    }

    /// 12×24 on/off cell for `ch`. Unknown characters get an outlined box.
    fn cell(font: Option<&mut PSF2Font<'static>>, ch: char, bold: bool) -> [bool; CELL_W * CELL_H] {
        let mut cell = [false; CELL_W * CELL_H];
        let mut found = false;

        if let Some(font) = font {
            let utf8 = ch.to_string();
            if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
                found = true;
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if on && row_y < CELL_H && col_x < CELL_W {
                            cell[row_y * CELL_W + col_x] = true;
                        }
                    }
                }
            }
        }

        if !found && !ch.is_whitespace() {
            for y in 4..BASELINE_ROW as usize {
                for x in 2..CELL_W - 2 {
                    if y == 4 || y == BASELINE_ROW as usize - 1 || x == 2 || x == CELL_W - 3 {
                        cell[y * CELL_W + x] = true;
                    }
                }
            }
        }

        if bold {
            for y in 0..CELL_H {
                for x in (1..CELL_W).rev() {
                    if cell[y * CELL_W + x - 1] {
                        cell[y * CELL_W + x] = true;
                    }
                }
            }
        }

        cell
    }
}

impl TextMeasurer for BitmapTypeface {
    fn measure(&self, text: &str, font: FontSpec) -> f32 {
        text.chars().count() as f32 * Self::advance(font.size)
    }
}

impl Typeface for BitmapTypeface {
    fn rasterize(&self, text: &str, font: FontSpec) -> GlyphMask {
        let advance = Self::advance(font.size);
        let scale = font.size / CELL_H as f32;
        let bold = font.weight == FontWeight::Bold;

        let width = ((text.chars().count() as f32 * advance).ceil() as usize).max(1);
        let height = (font.size.ceil() as usize).max(1);
        let mut mask = GlyphMask::blank(width, height, BASELINE_ROW * scale);

        let sample_weight = 1.0 / (SS * SS) as f32;
        let mut font = match Self::font() {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!(error = %e, "drawing placeholder boxes");
                None
            }
        };

        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let cell = Self::cell(font.as_mut(), ch, bold);
            let origin_x = i as f32 * advance;
            let x0 = origin_x.floor() as usize;
            let x1 = ((origin_x + advance).ceil() as usize).min(width);

            for py in 0..height {
                for px in x0..x1 {
                    let mut hits = 0usize;
                    for sy in 0..SS {
                        for sx in 0..SS {
                            let fx = px as f32 + (sx as f32 + 0.5) / SS as f32 - origin_x;
                            let fy = py as f32 + (sy as f32 + 0.5) / SS as f32;
                            if fx < 0.0 || fx >= advance {
                                continue;
                            }
                            let cx = (fx / scale) as usize;
                            let cy = (fy / scale) as usize;
                            if cx < CELL_W && cy < CELL_H && cell[cy * CELL_W + cx] {
                                hits += 1;
                            }
                        }
                    }
                    if hits > 0 {
                        mask.add(px as i32, py as i32, hits as f32 * sample_weight);
                    }
                }
            }
        }

        mask
    }
}
