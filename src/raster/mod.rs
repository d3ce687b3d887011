//! # Card Rasterizer
//!
//! Paints a [`LayoutPlan`] onto a fresh surface, back to front:
//!
//! 1. frame: full-canvas rounded rectangle in the theme color
//! 2. card: inset white rounded rectangle
//! 3. QR bitmap in the plan's QR rectangle
//! 4. badge square in the theme color with white centered text
//! 5. footer title lines, white, centered on the canvas
//!
//! Later steps occlude earlier ones. Pixels outside the frame's rounded
//! corners stay transparent.

mod surface;

pub use surface::{Surface, rounded_rect_distance};

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::StudioError;
use crate::config::Rgb;
use crate::font::{FontSpec, Typeface};
use crate::layout::LayoutPlan;

/// Render `plan` with the decoded QR bitmap.
pub fn render(
    plan: &LayoutPlan,
    qr_image: &RgbaImage,
    typeface: &dyn Typeface,
) -> Result<RgbaImage, StudioError> {
    let mut surface = Surface::new(plan.canvas_width, plan.canvas_height)?;

    surface.fill_rounded_rect(&plan.frame, plan.color);
    surface.fill_rounded_rect(&plan.card, Rgb::WHITE);
    surface.draw_image(qr_image, &plan.qr);

    if let Some(badge) = &plan.badge {
        surface.fill_rect(&badge.rect, plan.color);
        let mask = typeface.rasterize(&badge.text, FontSpec::bold(badge.font_size));
        let (cx, cy) = badge.rect.center();
        surface.fill_text_centered(&mask, cx, cy, Rgb::WHITE);
    }

    if let Some(title) = &plan.footer.title {
        for (line, y) in title.line_centers() {
            let mask = typeface.rasterize(line, FontSpec::medium(title.font_size));
            surface.fill_text_centered(&mask, title.center_x, y, Rgb::WHITE);
        }
    }

    Ok(surface.into_image())
}

/// Encode a bitmap as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, StudioError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| StudioError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(bytes)
}
