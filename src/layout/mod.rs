//! # Card Layout Planner
//!
//! Computes the pixel geometry of an exported card from the configuration
//! and a set of fixed layout constants. Planning is pure and total: the
//! same inputs always give the same [`LayoutPlan`], and absent optional
//! fields simply leave out their part of the plan.
//!
//! ## Card Anatomy
//!
//! ```text
//! ┌──────────────── frame (theme color) ────────────────┐
//! │   ┌──────────────── card (white) ───────────────┐   │
//! │   │   ┌───────────── QR symbol ─────────────┐   │   │
//! │   │   │            ┌─────────┐              │   │   │
//! │   │   │            │  badge  │              │   │   │
//! │   │   │            └─────────┘              │   │   │
//! │   │   └─────────────────────────────────────┘   │   │
//! │   └─────────────────────────────────────────────┘   │
//! │                 footer title line 1                 │
//! │                 footer title line 2                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sizing Rules
//!
//! - Footer height is 80 without a title, otherwise
//!   `max(180, 100 + (len / 20) * 40)`.
//! - The badge starts at a bold 36px font, is `clamp(width + 40, 140,
//!   0.35 × qr)` square, and its font shrinks by 2 down to a floor of 12
//!   until the text fits inside `side − 20`.
//! - Titles wrap greedily at 64px; more than two lines retries once at 48px.
//!
//! All measurements go through the [`TextMeasurer`] passed in by the
//! caller.

mod wrap;

pub use wrap::wrap_text;

use serde::Serialize;

use crate::config::{CardConfig, Features, Rgb};
use crate::font::{FontSpec, TextMeasurer};

/// Fixed layout constants. Defaults give an 800px wide card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutConstants {
    /// Rendered QR symbol side.
    pub qr_size: f32,
    /// Space between the card edge and the QR symbol.
    pub card_padding: f32,
    pub card_radius: f32,
    /// Frame space left and right of the card.
    pub frame_padding_x: f32,
    /// Frame space above the card.
    pub frame_padding_top: f32,
    pub frame_radius: f32,
    /// Minimum footer height when a title is present.
    pub footer_base_height: f32,
    /// Footer height without a title.
    pub footer_empty_height: f32,
    pub badge_font_size: f32,
    pub badge_padding: f32,
    pub badge_min_size: f32,
    /// Badge side limit as a fraction of `qr_size`.
    pub badge_max_ratio: f32,
    pub badge_font_step: f32,
    pub badge_min_font_size: f32,
    /// Text must fit within the badge side minus this inset.
    pub badge_fit_inset: f32,
    pub title_font_size: f32,
    /// Font size used when the title wraps past `title_max_lines`.
    pub title_fallback_font_size: f32,
    pub title_max_lines: usize,
    pub line_height_factor: f32,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            qr_size: 600.0,
            card_padding: 60.0,
            card_radius: 30.0,
            frame_padding_x: 40.0,
            frame_padding_top: 40.0,
            frame_radius: 40.0,
            footer_base_height: 180.0,
            footer_empty_height: 80.0,
            badge_font_size: 36.0,
            badge_padding: 40.0,
            badge_min_size: 140.0,
            badge_max_ratio: 0.35,
            badge_font_step: 2.0,
            badge_min_font_size: 12.0,
            badge_fit_inset: 20.0,
            title_font_size: 64.0,
            title_fallback_font_size: 48.0,
            title_max_lines: 2,
            line_height_factor: 1.2,
        }
    }
}

impl LayoutConstants {
    pub fn card_size(&self) -> f32 {
        self.qr_size + self.card_padding * 2.0
    }

    pub fn canvas_width(&self) -> f32 {
        self.card_size() + self.frame_padding_x * 2.0
    }

    /// Widest a footer title line may measure.
    pub fn title_max_width(&self) -> f32 {
        self.canvas_width() - self.frame_padding_x * 4.0
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// A `side`×`side` square sharing this rectangle's center.
    pub fn centered_square(&self, side: f32) -> Rect {
        let (cx, cy) = self.center();
        Rect::new(cx - side / 2.0, cy - side / 2.0, side, side)
    }
}

/// Rectangle with uniformly rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundedRect {
    #[serde(flatten)]
    pub rect: Rect,
    pub radius: f32,
}

/// Badge square over the center of the QR symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgePlan {
    pub rect: Rect,
    pub text: String,
    /// Resolved bold font size.
    pub font_size: f32,
}

/// Wrapped footer title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBlock {
    pub lines: Vec<String>,
    /// Resolved medium-weight font size.
    pub font_size: f32,
    pub line_height: f32,
    /// Vertical center of the first line; line `i` sits at
    /// `first_line_y + i * line_height`.
    pub first_line_y: f32,
    /// Horizontal center shared by all lines.
    pub center_x: f32,
}

impl TitleBlock {
    /// Vertical center of each line, in order.
    pub fn line_centers(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.as_str(), self.first_line_y + i as f32 * self.line_height))
    }
}

/// Band below the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterPlan {
    pub top: f32,
    pub height: f32,
    pub title: Option<TitleBlock>,
}

/// Complete geometry of one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Frame and badge color.
    pub color: Rgb,
    pub frame: RoundedRect,
    pub card: RoundedRect,
    /// Where the QR bitmap is drawn.
    pub qr: Rect,
    pub badge: Option<BadgePlan>,
    pub footer: FooterPlan,
}

/// Plans cards for a fixed set of constants and features.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    pub constants: LayoutConstants,
    pub features: Features,
}

impl Planner {
    pub fn new(constants: LayoutConstants, features: Features) -> Self {
        Self {
            constants,
            features,
        }
    }

    /// Compute the layout plan for `config`.
    pub fn plan<M: TextMeasurer + ?Sized>(&self, config: &CardConfig, measurer: &M) -> LayoutPlan {
        let c = &self.constants;
        let card_size = c.card_size();
        let footer_height = self.footer_height(config.title());

        let canvas_width = c.canvas_width();
        // Canvas dimensions are whole pixels; the footer band keeps its
        // fractional height for text placement.
        let canvas_height = (card_size + c.frame_padding_top + footer_height).floor();

        let frame = RoundedRect {
            rect: Rect::new(0.0, 0.0, canvas_width, canvas_height),
            radius: c.frame_radius,
        };
        let card = RoundedRect {
            rect: Rect::new(c.frame_padding_x, c.frame_padding_top, card_size, card_size),
            radius: c.card_radius,
        };
        let qr = Rect::new(
            card.rect.x + c.card_padding,
            card.rect.y + c.card_padding,
            c.qr_size,
            c.qr_size,
        );

        let badge = config
            .center_text()
            .filter(|_| self.features.badge)
            .map(|text| self.plan_badge(text, &qr, measurer));

        let footer_top = card.rect.bottom();
        let title = config
            .title()
            .map(|text| self.plan_title(text, footer_top, footer_height, canvas_width, measurer));

        LayoutPlan {
            canvas_width: canvas_width as u32,
            canvas_height: canvas_height as u32,
            color: config.color,
            frame,
            card,
            qr,
            badge,
            footer: FooterPlan {
                top: footer_top,
                height: footer_height,
                title,
            },
        }
    }

    /// Footer band height for an optional title.
    pub fn footer_height(&self, title: Option<&str>) -> f32 {
        let c = &self.constants;
        match title {
            None => c.footer_empty_height,
            Some(_) if !self.features.dynamic_wrap => c.footer_base_height,
            Some(text) => {
                let len = text.chars().count() as f32;
                c.footer_base_height.max(100.0 + (len / 20.0) * 40.0)
            }
        }
    }

    fn plan_badge<M: TextMeasurer + ?Sized>(
        &self,
        text: &str,
        qr: &Rect,
        measurer: &M,
    ) -> BadgePlan {
        let c = &self.constants;
        let text_width = measurer.measure(text, FontSpec::bold(c.badge_font_size));
        let max_side = c.qr_size * c.badge_max_ratio;
        let side = (text_width + c.badge_padding)
            .max(c.badge_min_size)
            .min(max_side);

        let mut font_size = c.badge_font_size;
        while measurer.measure(text, FontSpec::bold(font_size)) > side - c.badge_fit_inset
            && font_size > c.badge_min_font_size
        {
            font_size -= c.badge_font_step;
        }

        BadgePlan {
            rect: qr.centered_square(side),
            text: text.to_string(),
            font_size,
        }
    }

    fn plan_title<M: TextMeasurer + ?Sized>(
        &self,
        text: &str,
        footer_top: f32,
        footer_height: f32,
        canvas_width: f32,
        measurer: &M,
    ) -> TitleBlock {
        let c = &self.constants;
        let max_width = c.title_max_width();

        let mut font_size = c.title_font_size;
        let lines = if self.features.dynamic_wrap {
            let lines = wrap_text(text, max_width, FontSpec::medium(font_size), measurer);
            if lines.len() > c.title_max_lines {
                // Single retry, no further cascade
                font_size = c.title_fallback_font_size;
                wrap_text(text, max_width, FontSpec::medium(font_size), measurer)
            } else {
                lines
            }
        } else {
            vec![text.to_string()]
        };

        let line_height = font_size * c.line_height_factor;
        let total_height = lines.len() as f32 * line_height;
        let first_line_y = footer_top + footer_height / 2.0 - total_height / 2.0 + font_size / 2.0;

        TitleBlock {
            lines,
            font_size,
            line_height,
            first_line_y,
            center_x: canvas_width / 2.0,
        }
    }
}

/// Plan with default constants and features.
pub fn plan<M: TextMeasurer + ?Sized>(config: &CardConfig, measurer: &M) -> LayoutPlan {
    Planner::default().plan(config, measurer)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every character advances by half the font size.
    pub(crate) struct FixedAdvance;

    impl TextMeasurer for FixedAdvance {
        fn measure(&self, text: &str, font: FontSpec) -> f32 {
            text.chars().count() as f32 * font.size * 0.5
        }
    }

    fn config(content: &str, title: &str, center_text: &str) -> CardConfig {
        CardConfig {
            content: content.to_string(),
            title: title.to_string(),
            center_text: center_text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_base_geometry() {
        let plan = plan(&config("https://example.com", "", ""), &FixedAdvance);
        assert_eq!(plan.canvas_width, 800);
        assert_eq!(plan.canvas_height, 840);
        assert_eq!(plan.card.rect, Rect::new(40.0, 40.0, 720.0, 720.0));
        assert_eq!(plan.card.radius, 30.0);
        assert_eq!(plan.frame.radius, 40.0);
        assert_eq!(plan.qr, Rect::new(100.0, 100.0, 600.0, 600.0));
        assert_eq!(plan.footer.top, 760.0);
    }

    #[test]
    fn test_footer_height_formula() {
        let planner = Planner::default();
        assert_eq!(planner.footer_height(None), 80.0);
        assert_eq!(planner.footer_height(Some("short")), 180.0);
        let hundred = "x".repeat(100);
        assert_eq!(planner.footer_height(Some(&hundred)), 300.0);
        let sixty = "y".repeat(60);
        assert_eq!(planner.footer_height(Some(&sixty)), 220.0);
        // Real division: 50 chars → 100 + 2.5 * 40
        let fifty = "z".repeat(50);
        assert_eq!(planner.footer_height(Some(&fifty)), 200.0);
    }

    #[test]
    fn test_footer_counts_characters_not_bytes() {
        let planner = Planner::default();
        let accented = "é".repeat(100);
        assert_eq!(planner.footer_height(Some(&accented)), 300.0);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let cfg = config("https://example.com", "A title that wraps onto several lines for sure", "QR");
        let a = plan(&cfg, &FixedAdvance);
        let b = plan(&cfg, &FixedAdvance);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_badge_without_center_text() {
        let plan = plan(&config("https://example.com", "", ""), &FixedAdvance);
        assert!(plan.badge.is_none());
        assert!(plan.footer.title.is_none());
        assert_eq!(plan.footer.height, 80.0);
    }

    #[test]
    fn test_short_badge_uses_minimum_size() {
        let plan = plan(&config("x", "", "AB"), &FixedAdvance);
        let badge = plan.badge.unwrap();
        assert_eq!(badge.rect.width, 140.0);
        assert_eq!(badge.rect.height, 140.0);
        assert_eq!(badge.font_size, 36.0);
        // Centered on the QR symbol
        assert_eq!(badge.rect.center(), plan.qr.center());
    }

    #[test]
    fn test_badge_grows_with_text() {
        // 8 chars * 18 = 144 + 40 = 184
        let plan = plan(&config("x", "", "ABCDEFGH"), &FixedAdvance);
        let badge = plan.badge.unwrap();
        assert_eq!(badge.rect.width, 184.0);
        assert_eq!(badge.font_size, 36.0);
    }

    #[test]
    fn test_badge_capped_and_font_shrinks() {
        let plan = plan(&config("x", "", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"), &FixedAdvance);
        let badge = plan.badge.unwrap();
        assert_eq!(badge.rect.width, 210.0);
        // 26 chars fit in 190px at 14px (182px), not at 16px (208px)
        assert_eq!(badge.font_size, 14.0);
    }

    #[test]
    fn test_badge_font_stops_at_floor() {
        let long = "W".repeat(100);
        let plan = plan(&config("x", "", &long), &FixedAdvance);
        let badge = plan.badge.unwrap();
        assert_eq!(badge.font_size, 12.0);
        // Still overflows; accepted
        assert!(FixedAdvance.measure(&long, FontSpec::bold(12.0)) > badge.rect.width);
    }

    #[test]
    fn test_badge_disabled_by_feature() {
        let planner = Planner::new(
            LayoutConstants::default(),
            Features {
                badge: false,
                ..Default::default()
            },
        );
        assert!(planner.plan(&config("x", "", "AB"), &FixedAdvance).badge.is_none());
    }

    #[test]
    fn test_short_title_single_line() {
        let plan = plan(&config("x", "Meena Technologies", ""), &FixedAdvance);
        let title = plan.footer.title.unwrap();
        assert_eq!(title.lines, vec!["Meena Technologies"]);
        assert_eq!(title.font_size, 64.0);
        assert_eq!(title.center_x, 400.0);
        // 760 + 90 - 38.4 + 32
        assert!((title.first_line_y - 843.6).abs() < 1e-3);
        assert_eq!(plan.canvas_height, 940);
    }

    #[test]
    fn test_long_title_wraps_and_scales_once() {
        let text = "Scan this code to open our spring product catalog and offers";
        assert_eq!(text.chars().count(), 60);
        let plan = plan(&config("x", text, "AB"), &FixedAdvance);
        let title = plan.footer.title.unwrap();
        // Four lines at 64px, so retried at 48px, which still gives three
        assert_eq!(
            title.lines,
            vec!["Scan this code to open our", "spring product catalog and", "offers"]
        );
        assert_eq!(title.font_size, 48.0);
        assert!((title.line_height - 57.6).abs() < 1e-3);
        assert_eq!(plan.footer.height, 220.0);
        assert_eq!(plan.canvas_height, 980);
        // 760 + 110 - 86.4 + 24
        assert!((title.first_line_y - 807.6).abs() < 1e-3);
        assert_eq!(plan.badge.unwrap().rect.width, 140.0);
    }

    #[test]
    fn test_line_centers_step_by_line_height() {
        let plan = plan(
            &config("x", "Scan this code to open our spring product catalog and offers", ""),
            &FixedAdvance,
        );
        let title = plan.footer.title.unwrap();
        let centers: Vec<f32> = title.line_centers().map(|(_, y)| y).collect();
        assert_eq!(centers.len(), 3);
        assert!((centers[1] - centers[0] - title.line_height).abs() < 1e-3);
        assert!((centers[2] - centers[1] - title.line_height).abs() < 1e-3);
    }

    #[test]
    fn test_static_title_without_dynamic_wrap() {
        let planner = Planner::new(LayoutConstants::default(), Features::basic());
        let text = "Scan this code to open our spring product catalog and offers";
        let plan = planner.plan(&config("x", text, "AB"), &FixedAdvance);
        let title = plan.footer.title.unwrap();
        assert_eq!(title.lines, vec![text]);
        assert_eq!(title.font_size, 64.0);
        assert_eq!(plan.footer.height, 180.0);
        assert!(plan.badge.is_none());
    }

    #[test]
    fn test_plan_carries_theme_color() {
        let mut cfg = config("x", "", "");
        cfg.color = Rgb(0x1e, 0x40, 0xaf);
        assert_eq!(plan(&cfg, &FixedAdvance).color, Rgb(0x1e, 0x40, 0xaf));
    }
}
