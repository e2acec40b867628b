#![allow(clippy::float_cmp)]

use super::*;
use crate::recording::{Recorder, TestImage};

// =============================================================
// Styles and themes
// =============================================================

#[test]
fn title_bar_heights_per_style() {
    assert_eq!(FrameStyle::Macos.title_bar_height(), 28.0);
    assert_eq!(FrameStyle::Windows.title_bar_height(), 32.0);
    assert_eq!(FrameStyle::Browser.title_bar_height(), 40.0);
}

#[test]
fn parse_style_and_theme() {
    let spec = FrameSpec::parse("Windows", "dark").unwrap();
    assert_eq!(spec, FrameSpec::new(FrameStyle::Windows, FrameTheme::Dark));
    assert_eq!("mac".parse::<FrameStyle>(), Ok(FrameStyle::Macos));
}

#[test]
fn parse_rejects_unknown_names() {
    assert_eq!(FrameSpec::parse("phone", "light"), Err(MockupError::UnknownStyle("phone".into())));
    assert_eq!(FrameSpec::parse("browser", "sepia"), Err(MockupError::UnknownTheme("sepia".into())));
}

#[test]
fn frame_spec_serde_defaults_theme() {
    let spec: FrameSpec = serde_json::from_str(r#"{"style":"browser"}"#).unwrap();
    assert_eq!(spec, FrameSpec::new(FrameStyle::Browser, FrameTheme::Light));
}

#[test]
fn themes_have_distinct_bars() {
    assert_ne!(FrameTheme::Light.palette().bar, FrameTheme::Dark.palette().bar);
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn content_offset_is_title_bar() {
    let spec = FrameSpec::new(FrameStyle::Browser, FrameTheme::Light);
    assert_eq!(spec.content_offset(), Point::new(0.0, 40.0));
}

#[test]
fn outer_size_adds_title_bar_to_height_only() {
    let spec = FrameSpec::new(FrameStyle::Windows, FrameTheme::Dark);
    assert_eq!(spec.outer_size(800.0, 600.0), (800.0, 632.0));
}

// =============================================================
// Painting
// =============================================================

#[test]
fn paint_draws_image_below_band_and_returns_offset() {
    let rec = Recorder::default();
    let spec = FrameSpec::new(FrameStyle::Macos, FrameTheme::Light);
    let offset = paint(&rec, &TestImage, 400.0, 300.0, spec).unwrap();
    assert_eq!(offset, Point::new(0.0, 28.0));
    assert!(rec.has("fill_rect(0, 0, 400, 28)"));
    assert!(rec.has("draw_image(0, 28)"));
}

#[test]
fn paint_clips_to_rounded_outline_before_image() {
    let rec = Recorder::default();
    paint(&rec, &TestImage, 400.0, 300.0, FrameSpec::default()).unwrap();
    let clip = rec.position("clip").unwrap();
    let image = rec.position("draw_image(0, 28)").unwrap();
    assert!(clip < image);
    assert_eq!(rec.count("arc_to("), 4);
}

#[test]
fn macos_paints_three_traffic_lights() {
    let rec = Recorder::default();
    paint(&rec, &TestImage, 400.0, 300.0, FrameSpec::new(FrameStyle::Macos, FrameTheme::Dark)).unwrap();
    assert_eq!(rec.count("arc("), 3);
    for color in TRAFFIC_LIGHTS {
        assert!(rec.has(&format!("fill_color({color})")));
    }
}

#[test]
fn windows_paints_caption_glyphs_on_the_right() {
    let rec = Recorder::default();
    paint(&rec, &TestImage, 400.0, 300.0, FrameSpec::new(FrameStyle::Windows, FrameTheme::Light)).unwrap();
    assert_eq!(rec.count("arc("), 0);
    // Maximize glyph centered in the middle caption button.
    assert!(rec.has("stroke_rect(326, 11, 10, 10)"));
}

#[test]
fn browser_paints_address_field() {
    let rec = Recorder::default();
    let spec = FrameSpec::new(FrameStyle::Browser, FrameTheme::Light);
    paint(&rec, &TestImage, 400.0, 300.0, spec).unwrap();
    assert!(rec.has(&format!("fill_color({})", FrameTheme::Light.palette().field)));
    assert!(rec.has("draw_image(0, 40)"));
}

#[test]
fn paint_is_balanced_save_restore() {
    let rec = Recorder::default();
    paint(&rec, &TestImage, 120.0, 80.0, FrameSpec::default()).unwrap();
    assert_eq!(rec.count("save"), rec.count("restore"));
}

#[test]
fn paint_propagates_surface_errors() {
    let rec = Recorder::failing("draw_image");
    let err = paint(&rec, &TestImage, 100.0, 100.0, FrameSpec::default()).unwrap_err();
    assert_eq!(err, "draw_image failed");
}
