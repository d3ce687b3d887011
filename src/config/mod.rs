//! # Card Configuration
//!
//! The single mutable configuration object of a studio session, plus the
//! feature flags that select which card capabilities are active.
//!
//! Configuration is edited through one entry point, [`CardConfig::apply`],
//! which takes a [`ConfigField`] describing the edit. Nothing here is
//! persisted; the layout plan is recomputed from scratch on every export.
//!
//! ## Example
//!
//! ```
//! use qrstudio::config::{CardConfig, ConfigField};
//!
//! let mut config = CardConfig::default();
//! config.apply(ConfigField::Content("https://example.com".into())).unwrap();
//! config.apply(ConfigField::Color("royal blue".into())).unwrap();
//! assert!(config.has_content());
//! ```

pub mod theme;

pub use theme::{PREDEFINED_THEMES, Rgb, Theme, resolve_color, theme_by_name};

use serde::{Deserialize, Serialize};

use crate::StudioError;
use crate::qr::QrErrorLevel;

/// User-editable card configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Payload encoded in the QR symbol. Empty means nothing to render.
    pub content: String,
    /// Footer label. Empty means no footer text.
    pub title: String,
    /// Badge label drawn over the center of the symbol. Empty means no badge.
    pub center_text: String,
    /// Theme color: frame, badge, and QR foreground in the themed variant.
    pub color: Rgb,
    /// Light module color in the themed variant.
    pub bg_color: Rgb,
    /// Nominal preview size in pixels.
    pub size: u32,
    /// Preview quiet zone in modules (0 disables it).
    pub margin: u32,
    pub ec_level: QrErrorLevel,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            content: String::new(),
            title: String::new(),
            center_text: String::new(),
            color: Rgb::BLACK,
            bg_color: Rgb::WHITE,
            size: 512,
            margin: 4,
            ec_level: QrErrorLevel::H,
        }
    }
}

impl CardConfig {
    /// True when there is something to encode.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Title, if non-empty.
    pub fn title(&self) -> Option<&str> {
        Some(self.title.as_str()).filter(|t| !t.is_empty())
    }

    /// Badge text, if non-empty.
    pub fn center_text(&self) -> Option<&str> {
        Some(self.center_text.as_str()).filter(|t| !t.is_empty())
    }

    /// Apply a single edit.
    ///
    /// Color edits accept a theme name or a hex string; an unparsable color
    /// leaves the configuration unchanged and returns an error.
    pub fn apply(&mut self, field: ConfigField) -> Result<(), StudioError> {
        match field {
            ConfigField::Content(v) => self.content = v,
            ConfigField::Title(v) => self.title = v,
            ConfigField::CenterText(v) => self.center_text = v,
            ConfigField::Color(v) => self.color = resolve_color(&v)?,
            ConfigField::BgColor(v) => self.bg_color = resolve_color(&v)?,
            ConfigField::Size(v) => self.size = v,
            ConfigField::Margin(v) => self.margin = v,
            ConfigField::EcLevel(v) => self.ec_level = v,
        }
        Ok(())
    }
}

/// One edit to a [`CardConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigField {
    Content(String),
    Title(String),
    CenterText(String),
    Color(String),
    BgColor(String),
    Size(u32),
    Margin(u32),
    EcLevel(QrErrorLevel),
}

/// Optional card capabilities.
///
/// The defaults give the full-featured card: badge overlay, wrapped and
/// auto-scaled footer, title suggestions, black-on-white symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Draw the center badge when badge text is set.
    pub badge: bool,
    /// Wrap and auto-scale the footer title. When off the title is a
    /// single line in a fixed-height footer.
    pub dynamic_wrap: bool,
    /// Allow title suggestions from the text-suggestion service.
    pub suggestions: bool,
    /// Paint the symbol in the theme color on `bg_color` instead of
    /// black on white.
    pub themed_qr: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            badge: true,
            dynamic_wrap: true,
            suggestions: true,
            themed_qr: false,
        }
    }
}

impl Features {
    /// Static-label card: no badge, no wrapping, no suggestions.
    pub fn basic() -> Self {
        Self {
            badge: false,
            dynamic_wrap: false,
            suggestions: false,
            themed_qr: true,
        }
    }
}
