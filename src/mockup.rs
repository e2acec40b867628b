//! Decorative device frames ("mockups") drawn around the screenshot.
//!
//! A frame adds a title-bar band above the image, paints the style's window
//! controls into it and rounds the outer corners. The band height is fixed per
//! style and is the content offset: annotation space starts directly below it.

#[cfg(test)]
#[path = "mockup_test.rs"]
mod mockup_test;

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::render::Surface;

/// Radius of the frame's outer corners.
const CORNER_RADIUS: f64 = 10.0;
/// macOS-style traffic lights: red, yellow, green.
const TRAFFIC_LIGHTS: [&str; 3] = ["#ff5f57", "#febc2e", "#28c840"];
const TRAFFIC_LIGHT_RADIUS: f64 = 6.0;
const TRAFFIC_LIGHT_SPACING: f64 = 20.0;
/// Width of each Windows caption button.
const CAPTION_BUTTON_WIDTH: f64 = 46.0;
const CAPTION_GLYPH: f64 = 10.0;
/// Horizontal inset of the browser address field.
const ADDRESS_BAR_INSET: f64 = 80.0;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MockupError {
    #[error("unknown frame style: {0}")]
    UnknownStyle(String),
    #[error("unknown frame theme: {0}")]
    UnknownTheme(String),
}

/// Window chrome drawn in the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    Macos,
    Windows,
    Browser,
}

impl FrameStyle {
    /// Height of the title-bar band in pixels.
    #[must_use]
    pub fn title_bar_height(self) -> f64 {
        match self {
            Self::Macos => 28.0,
            Self::Windows => 32.0,
            Self::Browser => 40.0,
        }
    }
}

impl FromStr for FrameStyle {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "macos" | "mac" => Ok(Self::Macos),
            "windows" | "win" => Ok(Self::Windows),
            "browser" => Ok(Self::Browser),
            other => Err(MockupError::UnknownStyle(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameTheme {
    #[default]
    Light,
    Dark,
}

impl FromStr for FrameTheme {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(MockupError::UnknownTheme(other.to_owned())),
        }
    }
}

/// Colors used to paint a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bar: &'static str,
    pub separator: &'static str,
    pub glyph: &'static str,
    pub field: &'static str,
}

impl FrameTheme {
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette { bar: "#e8e8e8", separator: "#c8c8c8", glyph: "#3c3c3c", field: "#ffffff" },
            Self::Dark => Palette { bar: "#2d2d2d", separator: "#1a1a1a", glyph: "#d0d0d0", field: "#3c3c3c" },
        }
    }
}

/// An enabled frame: style plus theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameSpec {
    pub style: FrameStyle,
    #[serde(default)]
    pub theme: FrameTheme,
}

impl FrameSpec {
    #[must_use]
    pub fn new(style: FrameStyle, theme: FrameTheme) -> Self {
        Self { style, theme }
    }

    /// Parse toolbar names, e.g. `("windows", "dark")`.
    ///
    /// # Errors
    ///
    /// Returns [`MockupError`] if either name is unknown.
    pub fn parse(style: &str, theme: &str) -> Result<Self, MockupError> {
        Ok(Self::new(style.parse()?, theme.parse()?))
    }

    /// Where the image's top-left corner lands inside the framed surface.
    #[must_use]
    pub fn content_offset(self) -> Point {
        Point::new(0.0, self.style.title_bar_height())
    }

    /// Surface size needed to hold a `width` x `height` image in this frame.
    #[must_use]
    pub fn outer_size(self, width: f64, height: f64) -> (f64, f64) {
        (width, height + self.style.title_bar_height())
    }
}

/// Paint the frame and the image inside it. Returns the content offset.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn paint<S: Surface>(
    surface: &S,
    image: &S::Image,
    width: f64,
    height: f64,
    spec: FrameSpec,
) -> Result<Point, S::Error> {
    let bar_h = spec.style.title_bar_height();
    let palette = spec.theme.palette();
    let (outer_w, _) = spec.outer_size(width, height);

    surface.save();
    clip_to_frame(surface, width, height, spec)?;

    surface.set_fill_color(palette.bar);
    surface.fill_rect(0.0, 0.0, outer_w, bar_h);
    match spec.style {
        FrameStyle::Macos => traffic_lights(surface, bar_h, TRAFFIC_LIGHT_RADIUS)?,
        FrameStyle::Windows => caption_buttons(surface, outer_w, bar_h, palette),
        FrameStyle::Browser => {
            traffic_lights(surface, bar_h, TRAFFIC_LIGHT_RADIUS - 1.0)?;
            address_bar(surface, outer_w, bar_h, palette)?;
        }
    }

    surface.draw_image(image, 0.0, bar_h)?;

    surface.set_stroke_color(palette.separator);
    surface.set_line_width(1.0);
    surface.begin_path();
    surface.move_to(0.0, bar_h - 0.5);
    surface.line_to(outer_w, bar_h - 0.5);
    surface.stroke();
    surface.restore();

    Ok(spec.content_offset())
}

fn traffic_lights<S: Surface>(surface: &S, bar_h: f64, radius: f64) -> Result<(), S::Error> {
    let cy = bar_h / 2.0;
    let mut cx = TRAFFIC_LIGHT_SPACING - radius;
    for color in TRAFFIC_LIGHTS {
        surface.begin_path();
        surface.arc(cx, cy, radius, 0.0, 2.0 * PI)?;
        surface.set_fill_color(color);
        surface.fill();
        cx += TRAFFIC_LIGHT_SPACING;
    }
    Ok(())
}

/// Minimize, maximize and close glyphs, right-aligned.
fn caption_buttons<S: Surface>(surface: &S, width: f64, bar_h: f64, palette: Palette) {
    let cy = bar_h / 2.0;
    let half = CAPTION_GLYPH / 2.0;
    let center = |slot: f64| width - CAPTION_BUTTON_WIDTH * (slot + 0.5);

    surface.set_stroke_color(palette.glyph);
    surface.set_line_width(1.0);

    let min_x = center(2.0);
    surface.begin_path();
    surface.move_to(min_x - half, cy);
    surface.line_to(min_x + half, cy);
    surface.stroke();

    let max_x = center(1.0);
    surface.stroke_rect(max_x - half, cy - half, CAPTION_GLYPH, CAPTION_GLYPH);

    let close_x = center(0.0);
    surface.begin_path();
    surface.move_to(close_x - half, cy - half);
    surface.line_to(close_x + half, cy + half);
    surface.move_to(close_x + half, cy - half);
    surface.line_to(close_x - half, cy + half);
    surface.stroke();
}

fn address_bar<S: Surface>(surface: &S, width: f64, bar_h: f64, palette: Palette) -> Result<(), S::Error> {
    let inset_y = bar_h / 5.0;
    let field_w = (width - ADDRESS_BAR_INSET * 2.0).max(ADDRESS_BAR_INSET / 2.0);
    let field_h = bar_h - inset_y * 2.0;
    rounded_rect_path(surface, ADDRESS_BAR_INSET, inset_y, field_w, field_h, field_h / 2.0)?;
    surface.set_fill_color(palette.field);
    surface.fill();
    Ok(())
}

/// Restrict further drawing to the frame's rounded outline.
///
/// # Errors
///
/// Returns `Err` if the path cannot be traced.
pub fn clip_to_frame<S: Surface>(surface: &S, width: f64, height: f64, spec: FrameSpec) -> Result<(), S::Error> {
    let (outer_w, outer_h) = spec.outer_size(width, height);
    rounded_rect_path(surface, 0.0, 0.0, outer_w, outer_h, CORNER_RADIUS)?;
    surface.clip();
    Ok(())
}

/// Trace a closed rounded rectangle. The radius shrinks to fit small rects.
fn rounded_rect_path<S: Surface>(surface: &S, x: f64, y: f64, w: f64, h: f64, radius: f64) -> Result<(), S::Error> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    surface.begin_path();
    surface.move_to(x + r, y);
    surface.arc_to(x + w, y, x + w, y + h, r)?;
    surface.arc_to(x + w, y + h, x, y + h, r)?;
    surface.arc_to(x, y + h, x, y, r)?;
    surface.arc_to(x, y, x + w, y, r)?;
    surface.close_path();
    Ok(())
}
