//! Rendering: composites the scene onto the primary and overlay surfaces.
//!
//! Drawing goes through the [`Surface`] trait, a thin mirror of the 2D canvas
//! API implemented for [`web_sys::CanvasRenderingContext2d`]. This module
//! receives read-only views of document and gesture state and produces
//! pixels. It does not mutate any application state.
//!
//! The primary surface holds the committed result: base image (or the
//! decorative frame around it) followed by every annotation in store order.
//! The overlay surface sits on top and carries transient feedback: the
//! selection outline, rubber-band previews and the live pen stroke.
//!
//! All fallible surface calls propagate errors via `Result<(), S::Error>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::bounds::bounds;
use crate::color::contrasting_text;
use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_BASE, ARROW_HEAD_STEP, SELECTION_DASH, SELECTION_MARGIN};
use crate::doc::{ArrowShape, BlurShape, BoxShape, DocStore, PenStroke, Shape, StepMarker, TextShape};
use crate::geom::{Point, Rect};
use crate::input::{InputState, StrokeStyle, UiState, drag_shape};
use crate::mockup::{self, FrameSpec};

/// Selection outline color.
const SELECTION_COLOR: &str = "#0a84ff";
/// Selection outline width in canvas pixels.
const SELECTION_LINE_WIDTH: f64 = 1.5;
/// Translucent fill marking a blur region while it is being dragged.
const BLUR_PREVIEW_FILL: &str = "rgba(120, 120, 120, 0.25)";
const BLUR_PREVIEW_STROKE: &str = "#8e8e93";

/// The subset of the 2D canvas API the renderer needs.
///
/// Infallible canvas calls return `()`; calls that can throw in the browser
/// return `Result`.
pub trait Surface {
    /// Source for `draw_image`.
    type Image: ?Sized;
    /// Error raised by the backing canvas.
    type Error;

    fn save(&self);
    fn restore(&self);
    /// Reset the transform to identity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing context rejects the transform.
    fn reset_transform(&self) -> Result<(), Self::Error>;
    fn clear(&self, width: f64, height: f64);
    /// # Errors
    ///
    /// Returns `Err` if the backing context rejects the transform.
    fn translate(&self, x: f64, y: f64) -> Result<(), Self::Error>;

    fn set_fill_color(&self, color: &str);
    fn set_stroke_color(&self, color: &str);
    fn set_line_width(&self, width: f64);
    /// Dash pattern for subsequent strokes; empty for solid lines.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing context rejects the pattern.
    fn set_line_dash(&self, segments: &[f64]) -> Result<(), Self::Error>;
    /// Round line caps and joins.
    fn set_round_lines(&self);
    /// CSS filter applied to subsequent drawing, e.g. `blur(8px)` or `none`.
    fn set_filter(&self, filter: &str);

    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    /// # Errors
    ///
    /// Returns `Err` for a negative radius.
    fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), Self::Error>;
    /// # Errors
    ///
    /// Returns `Err` for a negative radius.
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn close_path(&self);
    fn rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn fill(&self);
    fn stroke(&self);
    fn clip(&self);
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&self, x: f64, y: f64, width: f64, height: f64);

    fn set_font(&self, font: &str);
    fn set_text_align(&self, align: &str);
    fn set_text_baseline(&self, baseline: &str);
    /// # Errors
    ///
    /// Returns `Err` if the backing context fails to draw the text.
    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), Self::Error>;

    /// Draw `image` with its top-left corner at `(x, y)`, at natural size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the image cannot be drawn (e.g. a zero-sized canvas).
    fn draw_image(&self, image: &Self::Image, x: f64, y: f64) -> Result<(), Self::Error>;
}

impl Surface for CanvasRenderingContext2d {
    type Image = HtmlCanvasElement;
    type Error = JsValue;

    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn reset_transform(&self) -> Result<(), JsValue> {
        self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    fn clear(&self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn set_fill_color(&self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_color(&self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_dash(&self, segments: &[f64]) -> Result<(), JsValue> {
        let pattern = segments.iter().copied().map(JsValue::from_f64).collect::<js_sys::Array>();
        CanvasRenderingContext2d::set_line_dash(self, &pattern)
    }

    fn set_round_lines(&self) {
        self.set_line_cap("round");
        self.set_line_join("round");
    }

    fn set_filter(&self, filter: &str) {
        CanvasRenderingContext2d::set_filter(self, filter);
    }

    fn begin_path(&self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc_to(self, x1, y1, x2, y2, radius)
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)
    }

    fn close_path(&self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn rect(&self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::rect(self, x, y, width, height);
    }

    fn fill(&self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn clip(&self) {
        CanvasRenderingContext2d::clip(self);
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn stroke_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, width, height);
    }

    fn set_font(&self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&self, align: &str) {
        CanvasRenderingContext2d::set_text_align(self, align);
    }

    fn set_text_baseline(&self, baseline: &str) {
        CanvasRenderingContext2d::set_text_baseline(self, baseline);
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)
    }

    fn draw_image(&self, image: &HtmlCanvasElement, x: f64, y: f64) -> Result<(), JsValue> {
        self.draw_image_with_html_canvas_element(image, x, y)
    }
}

/// The pristine base image and the optional frame around it.
pub struct Backdrop<'a, I: ?Sized> {
    /// Base image with any crop already applied. Never drawn on.
    pub image: &'a I,
    /// Image width in pixels.
    pub width: f64,
    /// Image height in pixels.
    pub height: f64,
    /// Decorative frame, when enabled.
    pub frame: Option<FrameSpec>,
}

impl<I: ?Sized> Backdrop<'_, I> {
    /// Offset of the image (and annotation space) inside the surface.
    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.frame.map_or_else(Point::default, FrameSpec::content_offset)
    }

    /// Full surface size: the image plus the frame's title bar.
    #[must_use]
    pub fn surface_size(&self) -> (f64, f64) {
        match self.frame {
            Some(frame) => frame.outer_size(self.width, self.height),
            None => (self.width, self.height),
        }
    }
}

/// Draw the committed scene onto the primary surface.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw<S: Surface>(surface: &S, backdrop: &Backdrop<'_, S::Image>, doc: &DocStore) -> Result<(), S::Error> {
    let (surface_w, surface_h) = backdrop.surface_size();

    // Layer 1: clear and paint the backdrop.
    surface.reset_transform()?;
    surface.clear(surface_w, surface_h);
    let offset = match backdrop.frame {
        Some(frame) => mockup::paint(surface, backdrop.image, backdrop.width, backdrop.height, frame)?,
        None => {
            surface.draw_image(backdrop.image, 0.0, 0.0)?;
            Point::default()
        }
    };

    // Layer 2: annotations in store order, in image space.
    surface.save();
    if let Some(frame) = backdrop.frame {
        mockup::clip_to_frame(surface, backdrop.width, backdrop.height, frame)?;
    }
    surface.translate(offset.x, offset.y)?;
    for annotation in doc.iter() {
        draw_shape(surface, &annotation.shape, backdrop.image)?;
    }
    surface.restore();
    Ok(())
}

/// Draw transient feedback onto the overlay surface.
///
/// `size` is the full surface size and `offset` the frame's content offset,
/// both as used for the primary surface.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw_overlay<S: Surface>(
    surface: &S,
    size: (f64, f64),
    offset: Point,
    doc: &DocStore,
    ui: &UiState,
    input: &InputState,
) -> Result<(), S::Error> {
    surface.reset_transform()?;
    surface.clear(size.0, size.1);
    surface.save();
    surface.translate(offset.x, offset.y)?;

    if let Some(annotation) = ui.selected_id.as_ref().and_then(|id| doc.get(id)) {
        draw_selection(surface, bounds(&annotation.shape))?;
    }

    match input {
        InputState::DrawingShape { tool, anchor, current } => {
            if let Some(shape) = drag_shape(*tool, *anchor, *current, &ui.style) {
                draw_preview(surface, &shape)?;
            }
        }
        InputState::DrawingPen { points } => {
            draw_pen(surface, &live_stroke(points, &ui.style));
        }
        InputState::Idle | InputState::DraggingAnnotation { .. } | InputState::AwaitingText { .. } => {}
    }

    surface.restore();
    Ok(())
}

fn live_stroke(points: &[Point], style: &StrokeStyle) -> PenStroke {
    PenStroke { points: points.to_vec(), color: style.color.clone(), thickness: style.size }
}

// =============================================================
// Shape dispatch
// =============================================================

fn draw_shape<S: Surface>(surface: &S, shape: &Shape, base: &S::Image) -> Result<(), S::Error> {
    if !shape.is_drawable() {
        return Ok(());
    }
    match shape {
        Shape::Arrow(a) => draw_arrow(surface, a),
        Shape::Box(b) => {
            draw_box(surface, b);
            Ok(())
        }
        Shape::Text(t) => draw_text(surface, t),
        Shape::Blur(b) => draw_blur(surface, b, base),
        Shape::Step(s) => draw_step(surface, s),
        Shape::Pen(p) => {
            draw_pen(surface, p);
            Ok(())
        }
    }
}

/// Overlay rendition of an in-progress drag. Blur regions have no base image
/// on the overlay, so they show as a shaded dashed rectangle instead.
fn draw_preview<S: Surface>(surface: &S, shape: &Shape) -> Result<(), S::Error> {
    if !shape.is_drawable() {
        return Ok(());
    }
    match shape {
        Shape::Arrow(a) => draw_arrow(surface, a),
        Shape::Box(b) => {
            draw_box(surface, b);
            Ok(())
        }
        Shape::Blur(b) => {
            surface.set_fill_color(BLUR_PREVIEW_FILL);
            surface.fill_rect(b.x, b.y, b.width, b.height);
            surface.set_stroke_color(BLUR_PREVIEW_STROKE);
            surface.set_line_width(1.0);
            surface.set_line_dash(&[SELECTION_DASH, SELECTION_DASH])?;
            surface.stroke_rect(b.x, b.y, b.width, b.height);
            surface.set_line_dash(&[])
        }
        Shape::Text(_) | Shape::Step(_) | Shape::Pen(_) => Ok(()),
    }
}

// =============================================================
// Shape renderers
// =============================================================

fn draw_arrow<S: Surface>(surface: &S, arrow: &ArrowShape) -> Result<(), S::Error> {
    let thickness = f64::from(arrow.thickness);
    let angle = (arrow.y2 - arrow.y1).atan2(arrow.x2 - arrow.x1);
    let head = thickness.mul_add(ARROW_HEAD_STEP, ARROW_HEAD_BASE);

    surface.save();
    surface.set_stroke_color(&arrow.color);
    surface.set_fill_color(&arrow.color);
    surface.set_line_width(thickness);
    surface.set_round_lines();

    surface.begin_path();
    surface.move_to(arrow.x1, arrow.y1);
    surface.line_to(arrow.x2, arrow.y2);
    surface.stroke();

    surface.begin_path();
    surface.move_to(arrow.x2, arrow.y2);
    surface.line_to(
        arrow.x2 - head * (angle - ARROW_HEAD_ANGLE).cos(),
        arrow.y2 - head * (angle - ARROW_HEAD_ANGLE).sin(),
    );
    surface.line_to(
        arrow.x2 - head * (angle + ARROW_HEAD_ANGLE).cos(),
        arrow.y2 - head * (angle + ARROW_HEAD_ANGLE).sin(),
    );
    surface.close_path();
    surface.fill();

    surface.restore();
    Ok(())
}

fn draw_box<S: Surface>(surface: &S, b: &BoxShape) {
    surface.save();
    if b.filled {
        surface.set_fill_color(&b.color);
        surface.fill_rect(b.x, b.y, b.width, b.height);
    } else {
        surface.set_stroke_color(&b.color);
        surface.set_line_width(f64::from(b.thickness));
        surface.stroke_rect(b.x, b.y, b.width, b.height);
    }
    surface.restore();
}

fn draw_text<S: Surface>(surface: &S, t: &TextShape) -> Result<(), S::Error> {
    surface.save();
    surface.set_fill_color(&t.color);
    surface.set_font(&format!("bold {:.0}px sans-serif", t.font_size()));
    surface.set_text_align("left");
    surface.set_text_baseline("top");
    surface.fill_text(&t.text, t.x, t.y)?;
    surface.restore();
    Ok(())
}

/// Re-sample the pristine base image under a clip so stacked blurs and
/// annotations beneath never feed back into the blurred pixels.
fn draw_blur<S: Surface>(surface: &S, b: &BlurShape, base: &S::Image) -> Result<(), S::Error> {
    surface.save();
    surface.begin_path();
    surface.rect(b.x, b.y, b.width, b.height);
    surface.clip();
    surface.set_filter(&format!("blur({}px)", b.intensity));
    surface.draw_image(base, 0.0, 0.0)?;
    surface.restore();
    Ok(())
}

fn draw_step<S: Surface>(surface: &S, s: &StepMarker) -> Result<(), S::Error> {
    let r = s.radius();
    surface.save();
    surface.begin_path();
    surface.arc(s.x, s.y, r, 0.0, 2.0 * PI)?;
    surface.set_fill_color(&s.color);
    surface.fill();

    surface.set_fill_color(contrasting_text(&s.color));
    surface.set_font(&format!("bold {r:.0}px sans-serif"));
    surface.set_text_align("center");
    surface.set_text_baseline("middle");
    surface.fill_text(&s.number.to_string(), s.x, s.y)?;
    surface.restore();
    Ok(())
}

fn draw_pen<S: Surface>(surface: &S, p: &PenStroke) {
    let Some((first, rest)) = p.points.split_first() else {
        return;
    };
    surface.save();
    surface.set_stroke_color(&p.color);
    surface.set_line_width(f64::from(p.thickness));
    surface.set_round_lines();
    surface.begin_path();
    surface.move_to(first.x, first.y);
    for pt in rest {
        surface.line_to(pt.x, pt.y);
    }
    surface.stroke();
    surface.restore();
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection<S: Surface>(surface: &S, rect: Rect) -> Result<(), S::Error> {
    let r = rect.inflate(SELECTION_MARGIN);
    surface.save();
    surface.set_stroke_color(SELECTION_COLOR);
    surface.set_line_width(SELECTION_LINE_WIDTH);
    surface.set_line_dash(&[SELECTION_DASH, SELECTION_DASH])?;
    surface.stroke_rect(r.x, r.y, r.width, r.height);
    surface.restore();
    Ok(())
}
