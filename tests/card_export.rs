//! # Card Export Tests
//!
//! End-to-end checks of the config → plan → PNG pipeline through the
//! public API, using the built-in bitmap typeface so results do not depend
//! on installed fonts.

use pretty_assertions::assert_eq;
use qrstudio::config::{CardConfig, ConfigField, Features, Rgb};
use qrstudio::export::{export_card, export_filename};
use qrstudio::font::BitmapTypeface;
use qrstudio::layout::{LayoutConstants, Planner};
use qrstudio::studio::Studio;
use qrstudio::StudioError;

const SIXTY_CHAR_TITLE: &str = "Scan this code to open our spring product catalog and offers";

fn studio_with(content: &str, title: &str, badge: &str) -> Studio {
    let mut studio = Studio::new(Box::new(BitmapTypeface::new().unwrap()));
    studio.update(ConfigField::Content(content.into())).unwrap();
    studio.update(ConfigField::Title(title.into())).unwrap();
    studio.update(ConfigField::CenterText(badge.into())).unwrap();
    studio
}

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

#[tokio::test]
async fn empty_content_exports_nothing() {
    for (title, badge) in [("", ""), ("A title", ""), ("", "AB"), ("A title", "AB")] {
        let studio = studio_with("", title, badge);
        assert!(studio.export().await.unwrap().is_none());
        assert!(studio.try_export().await.is_none());
    }
}

#[tokio::test]
async fn plain_url_card() {
    let studio = studio_with("https://example.com", "", "");

    let plan = studio.plan();
    assert!(plan.badge.is_none());
    assert!(plan.footer.title.is_none());
    assert_eq!(plan.footer.height, 80.0);

    let export = studio.export().await.unwrap().unwrap();
    assert_eq!(export.filename, "qrcode.png");
    assert_eq!((export.width, export.height), (800, 840));

    let image = decode(&export.png);
    assert_eq!(image.dimensions(), (800, 840));
}

#[tokio::test]
async fn titled_card_with_badge() {
    let studio = studio_with("https://example.com", SIXTY_CHAR_TITLE, "AB");

    let plan = studio.plan();
    let title = plan.footer.title.clone().unwrap();
    assert!(title.lines.len() > 1);
    assert_eq!(title.font_size, 48.0);
    let badge = plan.badge.clone().unwrap();
    assert_eq!(badge.rect.width, 140.0);
    assert_eq!(badge.font_size, 36.0);

    let export = studio.export().await.unwrap().unwrap();
    assert_eq!(export.filename, format!("{}.png", SIXTY_CHAR_TITLE));
    assert_eq!(export.height, plan.canvas_height);
}

#[tokio::test]
async fn export_is_deterministic() {
    let studio = studio_with("https://example.com/menu", "Dinner Menu", "EAT");
    let a = studio.export().await.unwrap().unwrap();
    let b = studio.export().await.unwrap().unwrap();
    assert_eq!(a.png, b.png);
    assert_eq!(studio.plan(), studio.plan());
}

#[tokio::test]
async fn saves_under_title_in_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let studio = studio_with("https://example.com", "Spring Menu", "");
    let export = studio.export().await.unwrap().unwrap();
    let path = export.save(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("Spring Menu.png"));
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, export.png);
}

#[tokio::test]
async fn theme_color_fills_frame() {
    let mut studio = studio_with("https://example.com", "", "");
    studio
        .update(ConfigField::Color("deep purple".into()))
        .unwrap();
    let export = studio.export().await.unwrap().unwrap();
    let image = decode(&export.png);

    let purple = Rgb(0x4c, 0x1d, 0x95).to_rgba();
    assert_eq!(*image.get_pixel(20, 420), purple);
    assert_eq!(*image.get_pixel(400, 800), purple);
    assert_eq!(image.get_pixel(0, 0)[3], 0);
}

#[tokio::test]
async fn themed_qr_uses_theme_modules() {
    let config = CardConfig {
        content: "https://example.com".to_string(),
        color: Rgb(0x06, 0x4e, 0x3b),
        bg_color: Rgb(0xf0, 0xfd, 0xf4),
        ..Default::default()
    };
    let export = export_card(
        &config,
        Features::basic(),
        LayoutConstants::default(),
        &BitmapTypeface,
    )
    .await
    .unwrap()
    .unwrap();
    let image = decode(&export.png);
    // Finder pattern corner is a dark module
    assert_eq!(*image.get_pixel(100, 100), Rgb(0x06, 0x4e, 0x3b).to_rgba());
}

fn dir_is_empty(dir: &std::path::Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[tokio::test]
async fn failed_decode_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let studio = studio_with("https://example.com", "Menu", "AB").constants(LayoutConstants {
        qr_size: 0.0,
        ..Default::default()
    });

    let err = studio.export().await.unwrap_err();
    assert!(matches!(err, StudioError::Decode(_)), "got {:?}", err);

    if let Some(export) = studio.try_export().await {
        export.save(dir.path()).unwrap();
    }
    assert!(dir_is_empty(dir.path()));
}

#[tokio::test]
async fn oversized_content_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let studio = studio_with(&"x".repeat(5000), "", "");
    assert!(studio.can_export());

    let err = studio.export().await.unwrap_err();
    assert!(matches!(err, StudioError::Qr(_)), "got {:?}", err);

    if let Some(export) = studio.try_export().await {
        export.save(dir.path()).unwrap();
    }
    assert!(dir_is_empty(dir.path()));
}

#[test]
fn custom_constants_change_geometry() {
    let constants = LayoutConstants {
        qr_size: 300.0,
        card_padding: 30.0,
        ..Default::default()
    };
    let config = CardConfig {
        content: "x".to_string(),
        ..Default::default()
    };
    let plan = Planner::new(constants, Features::default()).plan(&config, &BitmapTypeface);
    assert_eq!(plan.canvas_width, 440);
    assert_eq!(plan.canvas_height, 360 + 40 + 80);
}

#[test]
fn fallback_filename() {
    assert_eq!(export_filename(""), "qrcode.png");
}
