//! # Card Export
//!
//! Turns a configuration into PNG bytes and a filename: encode the QR
//! symbol, decode it to a bitmap, plan, rasterize, encode.
//!
//! Empty content is not an error; there is simply nothing to export and
//! [`export_card`] returns `Ok(None)`.

use std::path::{Path, PathBuf};

use crate::StudioError;
use crate::config::{CardConfig, Features};
use crate::font::Typeface;
use crate::layout::{LayoutConstants, Planner};
use crate::qr::{QrColors, QrSymbol};
use crate::raster;

/// Filename used when the card has no title.
pub const FALLBACK_NAME: &str = "qrcode";

/// A rendered card ready to be saved.
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl Export {
    /// Write into `dir` under [`Export::filename`], returning the full path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, StudioError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.png)?;
        Ok(path)
    }
}

/// `"<title>.png"`, or `"qrcode.png"` for an empty title.
pub fn export_filename(title: &str) -> String {
    if title.is_empty() {
        format!("{}.png", FALLBACK_NAME)
    } else {
        format!("{}.png", title)
    }
}

/// QR module colors for the given features.
pub fn qr_colors(config: &CardConfig, features: Features) -> QrColors {
    if features.themed_qr {
        QrColors {
            dark: config.color,
            light: config.bg_color,
        }
    } else {
        QrColors::default()
    }
}

/// Render the card for `config`.
pub async fn export_card(
    config: &CardConfig,
    features: Features,
    constants: LayoutConstants,
    typeface: &dyn Typeface,
) -> Result<Option<Export>, StudioError> {
    if !config.has_content() {
        tracing::debug!("export skipped: no content");
        return Ok(None);
    }

    let symbol = QrSymbol::encode(&config.content, config.ec_level)?;
    let planner = Planner::new(constants, features);
    let plan = planner.plan(config, typeface);
    tracing::debug!(
        width = plan.canvas_width,
        height = plan.canvas_height,
        badge = plan.badge.is_some(),
        title_lines = plan.footer.title.as_ref().map_or(0, |t| t.lines.len()),
        "card planned"
    );

    let qr_image = symbol
        .decode(plan.qr.width.round() as u32, qr_colors(config, features))
        .await?;
    let image = raster::render(&plan, &qr_image, typeface)?;
    let png = raster::encode_png(&image)?;

    Ok(Some(Export {
        filename: export_filename(&config.title),
        width: plan.canvas_width,
        height: plan.canvas_height,
        png,
    }))
}
