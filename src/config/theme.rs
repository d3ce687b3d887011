//! Theme colors.
//!
//! Colors are written as CSS-style hex strings (`#1e40af`, `#fff`) and held
//! as [`Rgb`] triples. The predefined themes are the palette offered by the
//! studio's theme picker.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::StudioError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, StudioError> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || StudioError::Config(format!("Invalid hex color '{}'", s));

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| bad())?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| bad())?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| bad())?;
                Ok(Rgb(r, g, b))
            }
            3 => {
                // #abc expands to #aabbcc
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| bad());
                Ok(Rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17))
            }
            _ => Err(bad()),
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Opaque RGBA pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A named theme color.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub color: Rgb,
}

/// Themes offered by the picker, in display order.
pub const PREDEFINED_THEMES: &[Theme] = &[
    Theme {
        name: "Onyx Black",
        color: Rgb(0x00, 0x00, 0x00),
    },
    Theme {
        name: "Royal Blue",
        color: Rgb(0x1e, 0x40, 0xaf),
    },
    Theme {
        name: "Forest Green",
        color: Rgb(0x06, 0x4e, 0x3b),
    },
    Theme {
        name: "Wine Red",
        color: Rgb(0x7f, 0x1d, 0x1d),
    },
    Theme {
        name: "Deep Purple",
        color: Rgb(0x4c, 0x1d, 0x95),
    },
    Theme {
        name: "Slate Gray",
        color: Rgb(0x33, 0x41, 0x55),
    },
];

/// Look up a theme by name, ignoring case, spaces and dashes
/// (`"royal-blue"`, `"RoyalBlue"` and `"Royal Blue"` all match).
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    let key = normalize(name);
    PREDEFINED_THEMES.iter().find(|t| normalize(t.name) == key)
}

/// Resolve a theme name or a hex color.
pub fn resolve_color(value: &str) -> Result<Rgb, StudioError> {
    if let Some(theme) = theme_by_name(value) {
        return Ok(theme.color);
    }
    Rgb::from_hex(value).map_err(|_| {
        StudioError::Config(format!(
            "'{}' is neither a theme name nor a hex color",
            value
        ))
    })
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
