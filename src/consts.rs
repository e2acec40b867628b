//! Shared numeric constants for the annotation engine.

// ── Hit-testing ─────────────────────────────────────────────────

/// Tolerance added on every side of an annotation's bounds when hit-testing,
/// in canvas pixels.
pub const HIT_PADDING: f64 = 15.0;

/// Margin between an annotation's bounds and its dashed selection outline.
pub const SELECTION_MARGIN: f64 = 5.0;

/// Dash segment length of the selection outline.
pub const SELECTION_DASH: f64 = 6.0;

// ── Gestures ────────────────────────────────────────────────────

/// Minimum pointer displacement for an arrow/box/blur drag to count as a
/// shape rather than an accidental click.
pub const MIN_DRAG_PX: f64 = 5.0;

/// A pen stroke must collect more than this many points to be kept.
pub const MIN_PEN_POINTS: usize = 2;

// ── Annotation geometry ─────────────────────────────────────────

/// Text font size is `size * TEXT_SIZE_STEP + TEXT_SIZE_BASE` pixels.
pub const TEXT_SIZE_STEP: f64 = 6.0;
pub const TEXT_SIZE_BASE: f64 = 12.0;

/// Estimated glyph advance as a fraction of the font size.
pub const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// Upper bound of the shared size control.
pub const MAX_SIZE: u32 = 50;

/// Largest text size accepted from the property panel.
pub const MAX_TEXT_SIZE: u32 = 10;

/// Step marker radius is `STEP_RADIUS_BASE + size * STEP_RADIUS_STEP`.
pub const STEP_RADIUS_BASE: f64 = 12.0;
pub const STEP_RADIUS_STEP: f64 = 1.5;

/// Blur intensity applied per unit of the shared size control.
pub const BLUR_PER_SIZE: u32 = 4;

/// Arrowhead length is `ARROW_HEAD_BASE + thickness * ARROW_HEAD_STEP`.
pub const ARROW_HEAD_BASE: f64 = 8.0;
pub const ARROW_HEAD_STEP: f64 = 3.0;

/// Arrowhead half-angle in radians (~30°).
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;
