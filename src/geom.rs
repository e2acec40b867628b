//! Geometry primitives and CSS-to-canvas coordinate conversion.
//!
//! Annotation coordinates live in base-image pixel space. The editor canvas is
//! displayed at some CSS size, so pointer positions arriving from the DOM have
//! to be scaled into canvas pixels ([`Viewport::to_canvas`]) and then shifted
//! by the decorative frame's content offset before they touch the scene.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either CSS or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle. `width` and `height` are never negative when
/// produced by [`Rect::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn inflate(self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Mapping between the canvas's displayed CSS box and its pixel buffer.
///
/// `css_width` / `css_height` are the element's layout size;
/// `canvas_width` / `canvas_height` are the backing store dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { css_width: 1.0, css_height: 1.0, canvas_width: 1.0, canvas_height: 1.0 }
    }
}

impl Viewport {
    /// Horizontal canvas pixels per CSS pixel. Falls back to 1 for a
    /// collapsed element.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        if self.css_width > 0.0 {
            self.canvas_width / self.css_width
        } else {
            1.0
        }
    }

    /// Vertical canvas pixels per CSS pixel.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        if self.css_height > 0.0 {
            self.canvas_height / self.css_height
        } else {
            1.0
        }
    }

    /// Change the canvas pixel size while keeping the current CSS scale, so
    /// pointer mapping stays right until the host reports the new CSS size.
    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        self.canvas_width = width;
        self.canvas_height = height;
        self.css_width = if sx > 0.0 { width / sx } else { width };
        self.css_height = if sy > 0.0 { height / sy } else { height };
    }

    /// Convert an element-relative CSS point to canvas pixels.
    #[must_use]
    pub fn to_canvas(&self, css: Point) -> Point {
        Point { x: css.x * self.scale_x(), y: css.y * self.scale_y() }
    }
}
