//! Axis-aligned bounds for every annotation kind.
//!
//! Used identically by hit-testing (with [`crate::consts::HIT_PADDING`]) and
//! by the selection outline (with [`crate::consts::SELECTION_MARGIN`]).
//! Bounds are computed on demand; annotations mutate in place during drags so
//! nothing here is cached.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::consts::TEXT_WIDTH_FACTOR;
use crate::doc::{Shape, TextShape};
use crate::geom::{Point, Rect};

/// Bounding rectangle of `shape` in canvas space.
#[must_use]
pub fn bounds(shape: &Shape) -> Rect {
    match shape {
        Shape::Arrow(a) => Rect::from_corners(Point::new(a.x1, a.y1), Point::new(a.x2, a.y2)),
        Shape::Box(b) => Rect::new(b.x, b.y, b.width, b.height),
        Shape::Blur(b) => Rect::new(b.x, b.y, b.width, b.height),
        Shape::Text(t) => Rect::new(t.x, t.y, estimated_text_width(t), t.font_size()),
        Shape::Step(s) => {
            let r = s.radius();
            Rect::new(s.x - r, s.y - r, r * 2.0, r * 2.0)
        }
        Shape::Pen(p) => points_bounds(&p.points),
    }
}

/// Width estimate without font metrics: every character advances
/// `font_size * TEXT_WIDTH_FACTOR`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimated_text_width(text: &TextShape) -> f64 {
    text.text.chars().count() as f64 * text.font_size() * TEXT_WIDTH_FACTOR
}

fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
