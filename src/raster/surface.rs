//! RGBA drawing surface.
//!
//! A minimal 2D canvas: anti-aliased rounded rectangles and rectangles,
//! image blits, and coverage-mask text. All fills use source-over
//! compositing with the shape's per-pixel coverage as alpha.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::StudioError;
use crate::config::Rgb;
use crate::font::GlyphMask;
use crate::layout::{Rect, RoundedRect};

/// Signed distance from `(x, y)` to a rounded rectangle.
///
/// Negative inside, positive outside. The radius is clamped to half the
/// shorter side.
#[inline]
pub fn rounded_rect_distance(x: f32, y: f32, rr: &RoundedRect) -> f32 {
    let (cx, cy) = rr.rect.center();
    let hw = rr.rect.width / 2.0;
    let hh = rr.rect.height / 2.0;
    let r = rr.radius.clamp(0.0, hw.min(hh));

    let qx = (x - cx).abs() - (hw - r);
    let qy = (y - cy).abs() - (hh - r);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

/// Length of the overlap between `[a0, a1)` and `[b0, b1)`.
#[inline]
fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

/// Composite `color` at `alpha` over `dst`.
#[inline]
fn blend(dst: &mut Rgba<u8>, color: Rgb, alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    if a >= 1.0 {
        *dst = color.to_rgba();
        return;
    }

    let dst_a = dst[3] as f32 / 255.0;
    let out_a = a + dst_a * (1.0 - a);
    let mix = |src: u8, d: u8| -> u8 {
        let v = (src as f32 * a + d as f32 * dst_a * (1.0 - a)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        mix(color.0, dst[0]),
        mix(color.1, dst[1]),
        mix(color.2, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}

/// A transparent RGBA canvas.
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Acquire a `width`×`height` surface. Zero-sized surfaces are refused.
    pub fn new(width: u32, height: u32) -> Result<Self, StudioError> {
        if width == 0 || height == 0 {
            return Err(StudioError::Surface(format!(
                "Cannot create a {}x{} drawing surface",
                width, height
            )));
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel range covering `[lo, hi)`, clipped to `0..limit`.
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
        let start = lo.floor().max(0.0) as u32;
        let end = (hi.ceil().max(0.0) as u32).min(limit);
        start.min(end)..end
    }

    /// Fill a rounded rectangle.
    pub fn fill_rounded_rect(&mut self, rr: &RoundedRect, color: Rgb) {
        let r = &rr.rect;
        for y in Self::span(r.y, r.bottom(), self.height()) {
            for x in Self::span(r.x, r.x + r.width, self.width()) {
                let d = rounded_rect_distance(x as f32 + 0.5, y as f32 + 0.5, rr);
                let coverage = (0.5 - d).clamp(0.0, 1.0);
                blend(self.image.get_pixel_mut(x, y), color, coverage);
            }
        }
    }

    /// Fill an axis-aligned rectangle; fractional edges are anti-aliased.
    pub fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        for y in Self::span(rect.y, rect.bottom(), self.height()) {
            let cov_y = overlap(y as f32, y as f32 + 1.0, rect.y, rect.bottom());
            for x in Self::span(rect.x, rect.x + rect.width, self.width()) {
                let cov_x = overlap(x as f32, x as f32 + 1.0, rect.x, rect.x + rect.width);
                blend(self.image.get_pixel_mut(x, y), color, cov_x * cov_y);
            }
        }
    }

    /// Draw `src` into `dest`, scaling with nearest-neighbor sampling when
    /// the sizes differ so QR modules stay crisp.
    pub fn draw_image(&mut self, src: &RgbaImage, dest: &Rect) {
        let w = dest.width.round().max(1.0) as u32;
        let h = dest.height.round().max(1.0) as u32;
        let scaled;
        let src = if src.dimensions() == (w, h) {
            src
        } else {
            scaled = imageops::resize(src, w, h, FilterType::Nearest);
            &scaled
        };
        imageops::overlay(
            &mut self.image,
            src,
            dest.x.round() as i64,
            dest.y.round() as i64,
        );
    }

    /// Paint a text mask centered on `(cx, cy)`: horizontally on its
    /// advance width, vertically on its line box.
    pub fn fill_text_centered(&mut self, mask: &GlyphMask, cx: f32, cy: f32, color: Rgb) {
        let left = (cx - mask.width as f32 / 2.0).round() as i64;
        let top = (cy - mask.height as f32 / 2.0).round() as i64;

        for my in 0..mask.height {
            let y = top + my as i64;
            if y < 0 || y >= self.height() as i64 {
                continue;
            }
            for mx in 0..mask.width {
                let x = left + mx as i64;
                if x < 0 || x >= self.width() as i64 {
                    continue;
                }
                let coverage = mask.get(mx, my);
                if coverage > 0.0 {
                    blend(self.image.get_pixel_mut(x as u32, y as u32), color, coverage);
                }
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
