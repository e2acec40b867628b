#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Rect
// =============================================================

#[test]
fn from_corners_top_left_to_bottom_right() {
    let r = Rect::from_corners(Point::new(10.0, 20.0), Point::new(110.0, 70.0));
    assert_eq!(r, Rect::new(10.0, 20.0, 100.0, 50.0));
}

#[test]
fn from_corners_is_direction_independent() {
    let a = Rect::from_corners(Point::new(110.0, 70.0), Point::new(10.0, 20.0));
    let b = Rect::from_corners(Point::new(10.0, 70.0), Point::new(110.0, 20.0));
    assert_eq!(a, Rect::new(10.0, 20.0, 100.0, 50.0));
    assert_eq!(a, b);
}

#[test]
fn inflate_grows_every_side() {
    let r = Rect::new(10.0, 10.0, 20.0, 30.0).inflate(5.0);
    assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 40.0));
}

#[test]
fn contains_is_inclusive_of_edges() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(5.0, 5.0)));
    assert!(!r.contains(Point::new(10.01, 5.0)));
    assert!(!r.contains(Point::new(5.0, -0.01)));
}

#[test]
fn right_and_bottom() {
    let r = Rect::new(3.0, 4.0, 10.0, 20.0);
    assert_eq!(r.right(), 13.0);
    assert_eq!(r.bottom(), 24.0);
}

// =============================================================
// Point
// =============================================================

#[test]
fn delta_from_and_offset() {
    let a = Point::new(30.0, 5.0);
    let b = Point::new(10.0, 10.0);
    assert_eq!(a.delta_from(b), (20.0, -5.0));
    assert_eq!(b.offset(20.0, -5.0), a);
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn viewport_scales_css_to_canvas() {
    let vp = Viewport { css_width: 500.0, css_height: 250.0, canvas_width: 1000.0, canvas_height: 500.0 };
    assert_eq!(vp.to_canvas(Point::new(100.0, 50.0)), Point::new(200.0, 100.0));
}

#[test]
fn viewport_identity_when_sizes_match() {
    let vp = Viewport { css_width: 800.0, css_height: 600.0, canvas_width: 800.0, canvas_height: 600.0 };
    assert_eq!(vp.to_canvas(Point::new(12.5, 7.0)), Point::new(12.5, 7.0));
}

#[test]
fn viewport_collapsed_element_falls_back_to_unit_scale() {
    let vp = Viewport { css_width: 0.0, css_height: 0.0, canvas_width: 800.0, canvas_height: 600.0 };
    assert_eq!(vp.scale_x(), 1.0);
    assert_eq!(vp.scale_y(), 1.0);
}

#[test]
fn resize_canvas_keeps_scale() {
    let mut vp = Viewport { css_width: 500.0, css_height: 250.0, canvas_width: 1000.0, canvas_height: 500.0 };
    vp.resize_canvas(1000.0, 556.0);
    assert_eq!(vp.canvas_height, 556.0);
    assert_eq!(vp.css_height, 278.0);
    assert_eq!(vp.to_canvas(Point::new(10.0, 10.0)), Point::new(20.0, 20.0));
}
