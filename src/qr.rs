//! # QR Symbol
//!
//! Encodes card content with the `qrcode` crate and hands it out in three
//! forms:
//!
//! - **SVG** for the live preview (the "vector image"),
//! - **terminal** text for previewing from the shell,
//! - **bitmap** at an exact pixel size for compositing into the card.
//!
//! Compositing waits on [`QrSymbol::decode`], which produces the bitmap on
//! the blocking pool and resolves once it is ready.

use clap::ValueEnum;
use image::RgbaImage;
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::StudioError;
use crate::config::Rgb;

/// QR error correction level.
///
/// | Level | Recovery |
/// |-------|----------|
/// | L | ~7% |
/// | M | ~15% |
/// | Q | ~25% |
/// | H | ~30% (default, survives the center badge) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum QrErrorLevel {
    L,
    M,
    Q,
    #[default]
    H,
}

impl From<QrErrorLevel> for EcLevel {
    fn from(level: QrErrorLevel) -> Self {
        match level {
            QrErrorLevel::L => EcLevel::L,
            QrErrorLevel::M => EcLevel::M,
            QrErrorLevel::Q => EcLevel::Q,
            QrErrorLevel::H => EcLevel::H,
        }
    }
}

/// Dark and light module colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrColors {
    pub dark: Rgb,
    pub light: Rgb,
}

impl Default for QrColors {
    fn default() -> Self {
        Self {
            dark: Rgb::BLACK,
            light: Rgb::WHITE,
        }
    }
}

/// An encoded QR symbol.
#[derive(Clone)]
pub struct QrSymbol {
    code: QrCode,
}

impl std::fmt::Debug for QrSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrSymbol")
            .field("modules", &self.modules())
            .finish()
    }
}

impl QrSymbol {
    /// Encode `content` at the given error correction level.
    pub fn encode(content: &str, level: QrErrorLevel) -> Result<Self, StudioError> {
        if content.is_empty() {
            return Err(StudioError::Qr("Nothing to encode".to_string()));
        }
        let code = QrCode::with_error_correction_level(content.as_bytes(), level.into())
            .map_err(|e| StudioError::Qr(format!("QR code generation failed: {}", e)))?;
        Ok(Self { code })
    }

    /// Modules per side, without quiet zone.
    pub fn modules(&self) -> usize {
        self.code.width()
    }

    /// Whether the module at `(x, y)` is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.code[(x, y)] == qrcode::Color::Dark
    }

    /// SVG markup at least `size` pixels square.
    pub fn to_svg(&self, size: u32, quiet_zone: bool, colors: QrColors) -> String {
        let dark = colors.dark.to_hex();
        let light = colors.light.to_hex();
        self.code
            .render::<svg::Color>()
            .min_dimensions(size, size)
            .quiet_zone(quiet_zone)
            .dark_color(svg::Color(&dark))
            .light_color(svg::Color(&light))
            .build()
    }

    /// Half-block text rendering for terminals.
    pub fn to_terminal(&self) -> String {
        self.code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build()
    }

    /// Bitmap of exactly `size`×`size` pixels, no quiet zone.
    ///
    /// Each pixel takes the color of the module under it, so modules may
    /// differ by one pixel in size when `size` is not a multiple of the
    /// module count.
    pub fn rasterize(&self, size: u32, colors: QrColors) -> Result<RgbaImage, StudioError> {
        if size == 0 {
            return Err(StudioError::Decode("QR bitmap size is zero".to_string()));
        }
        let modules = self.modules();
        let dark = colors.dark.to_rgba();
        let light = colors.light.to_rgba();

        Ok(RgbaImage::from_fn(size, size, |x, y| {
            let mx = x as usize * modules / size as usize;
            let my = y as usize * modules / size as usize;
            if self.is_dark(mx, my) { dark } else { light }
        }))
    }

    /// Rasterize off the async thread and wait for the result.
    pub async fn decode(&self, size: u32, colors: QrColors) -> Result<RgbaImage, StudioError> {
        let symbol = self.clone();
        tokio::task::spawn_blocking(move || symbol.rasterize(size, colors))
            .await
            .map_err(|e| StudioError::Decode(format!("QR decode task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_rejected() {
        assert!(matches!(
            QrSymbol::encode("", QrErrorLevel::H),
            Err(StudioError::Qr(_))
        ));
    }

    #[test]
    fn test_higher_level_needs_more_modules() {
        let text = "https://example.com/a/fairly/long/path?with=query&and=more";
        let low = QrSymbol::encode(text, QrErrorLevel::L).unwrap();
        let high = QrSymbol::encode(text, QrErrorLevel::H).unwrap();
        assert!(high.modules() >= low.modules());
    }

    #[test]
    fn test_rasterize_exact_size() {
        let symbol = QrSymbol::encode("https://example.com", QrErrorLevel::H).unwrap();
        let img = symbol.rasterize(600, QrColors::default()).unwrap();
        assert_eq!(img.dimensions(), (600, 600));
        // Finder pattern: top-left module is dark
        assert_eq!(*img.get_pixel(0, 0), Rgb::BLACK.to_rgba());
    }

    #[test]
    fn test_rasterize_uses_colors() {
        let symbol = QrSymbol::encode("colors", QrErrorLevel::M).unwrap();
        let colors = QrColors {
            dark: Rgb(0x1e, 0x40, 0xaf),
            light: Rgb(0xfa, 0xfa, 0xfa),
        };
        let img = symbol.rasterize(100, colors).unwrap();
        assert!(
            img.pixels()
                .all(|p| *p == colors.dark.to_rgba() || *p == colors.light.to_rgba())
        );
    }

    #[test]
    fn test_rasterize_zero_size_fails() {
        let symbol = QrSymbol::encode("x", QrErrorLevel::L).unwrap();
        assert!(matches!(
            symbol.rasterize(0, QrColors::default()),
            Err(StudioError::Decode(_))
        ));
    }

    #[test]
    fn test_svg_contains_colors() {
        let symbol = QrSymbol::encode("svg", QrErrorLevel::H).unwrap();
        let colors = QrColors {
            dark: Rgb(0x06, 0x4e, 0x3b),
            light: Rgb::WHITE,
        };
        let svg = symbol.to_svg(320, false, colors);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#064e3b"));
    }

    #[test]
    fn test_terminal_render_not_empty() {
        let symbol = QrSymbol::encode("term", QrErrorLevel::L).unwrap();
        assert!(symbol.to_terminal().lines().count() > 5);
    }

    #[tokio::test]
    async fn test_decode_matches_rasterize() {
        let symbol = QrSymbol::encode("decode", QrErrorLevel::Q).unwrap();
        let sync = symbol.rasterize(64, QrColors::default()).unwrap();
        let decoded = symbol.decode(64, QrColors::default()).await.unwrap();
        assert_eq!(sync, decoded);
    }
}
