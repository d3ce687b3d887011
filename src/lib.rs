//! # QR Studio - Styled QR Code Cards
//!
//! QR Studio turns a piece of content (usually a URL) into a PNG "card":
//! a theme-colored rounded frame, a white card holding the QR symbol, an
//! optional badge over the symbol's center, and an optional footer title
//! that wraps and shrinks to fit.
//!
//! ## Quick Start
//!
//! ```no_run
//! use qrstudio::{
//!     config::{CardConfig, Features},
//!     export::export_card,
//!     font::BitmapTypeface,
//!     layout::LayoutConstants,
//! };
//!
//! # async fn example() -> Result<(), qrstudio::StudioError> {
//! let config = CardConfig {
//!     content: "https://example.com".to_string(),
//!     title: "Spring Catalog".to_string(),
//!     center_text: "NEW".to_string(),
//!     ..Default::default()
//! };
//!
//! let typeface = BitmapTypeface::new()?;
//! let export = export_card(&config, Features::default(), LayoutConstants::default(), &typeface)
//!     .await?
//!     .expect("content is set");
//! export.save(std::path::Path::new("."))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Card configuration, themes, feature flags |
//! | [`layout`] | Layout planner (pure geometry) |
//! | [`raster`] | Rasterizer and PNG encoding |
//! | [`qr`] | QR symbol encoding and decoding to bitmaps |
//! | [`font`] | Text measurement and glyph rasterization |
//! | [`export`] | Config → PNG pipeline and filenames |
//! | [`suggest`] | Optional title suggestion service |
//! | [`studio`] | Session shell tying it all together |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod layout;
pub mod logging;
pub mod qr;
pub mod raster;
pub mod studio;
pub mod suggest;

// Re-exports for convenience
pub use config::CardConfig;
pub use error::StudioError;
pub use studio::Studio;
