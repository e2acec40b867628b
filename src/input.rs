//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `StrokeStyle` capture the user's choices at the time of a
//! pointer event. `InputState` is the gesture being tracked between
//! pointer-down and pointer-up, carrying everything needed to compute
//! positions on move and emit the final scene mutation on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_COLOR, normalize_hex_color};
use crate::consts::{BLUR_PER_SIZE, MAX_SIZE, MIN_DRAG_PX};
use crate::doc::{AnnotationId, ArrowShape, Shape};
use crate::geom::{Point, Rect};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select and move existing annotations.
    Select,
    /// Draw an arrow from the press point to the release point.
    #[default]
    Arrow,
    /// Draw a rectangle.
    Box,
    /// Place a text label.
    Text,
    /// Blur a rectangular region of the base image.
    Blur,
    /// Drop a numbered step marker.
    Step,
    /// Freehand pen stroke.
    Pen,
}

impl Tool {
    /// Whether this tool draws a rubber-band shape between two corners.
    #[must_use]
    pub fn is_drag_shape(self) -> bool {
        matches!(self, Self::Arrow | Self::Box | Self::Blur)
    }

    /// Name used by the host toolbar.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Arrow => "arrow",
            Self::Box => "box",
            Self::Text => "text",
            Self::Blur => "blur",
            Self::Step => "step",
            Self::Pen => "pen",
        }
    }
}

/// Error for a toolbar name that does not match any [`Tool`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(Self::Select),
            "arrow" => Ok(Self::Arrow),
            "box" | "rect" | "rectangle" => Ok(Self::Box),
            "text" => Ok(Self::Text),
            "blur" => Ok(Self::Blur),
            "step" => Ok(Self::Step),
            "pen" => Ok(Self::Pen),
            other => Err(UnknownTool(other.to_owned())),
        }
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: u8 = 1;
    pub const CTRL: u8 = 2;
    pub const ALT: u8 = 4;
    pub const META: u8 = 8;

    /// Decode the bit mask the host packs from a DOM event.
    #[must_use]
    pub fn from_mask(mask: u8) -> Self {
        Self {
            shift: mask & Self::SHIFT != 0,
            ctrl: mask & Self::CTRL != 0,
            alt: mask & Self::ALT != 0,
            meta: mask & Self::META != 0,
        }
    }

    /// Ctrl on Linux/Windows, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or pen/touch contact).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `PointerEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Color and size chosen in the property panel; new annotations use them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeStyle {
    /// Canonical `#rrggbb` color.
    pub color: String,
    /// Shared size control (thickness, text size step, marker size).
    pub size: u32,
    /// Whether new boxes are filled.
    pub filled: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self { color: DEFAULT_COLOR.to_owned(), size: 3, filled: false }
    }
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: &str, size: u32) -> Self {
        Self { color: normalize_hex_color(color, DEFAULT_COLOR), size: size.clamp(1, MAX_SIZE), filled: false }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected annotation, if any.
    pub selected_id: Option<AnnotationId>,
    /// Style applied to new annotations.
    pub style: StrokeStyle,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute positions
/// and emit final actions on pointer-up. All points are in image space.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an existing annotation.
    DraggingAnnotation {
        /// Id of the annotation being dragged.
        id: AnnotationId,
        /// Pointer position at pointer-down.
        anchor: Point,
        /// The shape as it was at pointer-down; positions are recomputed from
        /// this copy on every move.
        original: Shape,
    },
    /// The user is rubber-banding a new arrow, box or blur region.
    DrawingShape {
        /// Tool that started the gesture.
        tool: Tool,
        /// Where the drag started.
        anchor: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// The user is drawing a freehand stroke.
    DrawingPen {
        /// Points collected so far, including the pointer-down position.
        points: Vec<Point>,
    },
    /// A text prompt is open in the host; pointer input is ignored until it
    /// is answered.
    AwaitingText {
        /// Where the label will be placed.
        at: Point,
    },
}

impl InputState {
    /// Whether a gesture or prompt is pending.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Shape a rubber-band gesture describes between `anchor` and `current`.
///
/// Used both for the overlay preview and for the committed annotation, so
/// what the user sees while dragging is exactly what lands in the store.
/// Box and blur regions are normalized to a positive width and height.
/// `None` for tools without a drag phase.
#[must_use]
pub fn drag_shape(tool: Tool, anchor: Point, current: Point, style: &StrokeStyle) -> Option<Shape> {
    match tool {
        Tool::Arrow => Some(Shape::Arrow(ArrowShape {
            x1: anchor.x,
            y1: anchor.y,
            x2: current.x,
            y2: current.y,
            color: style.color.clone(),
            thickness: style.size,
        })),
        Tool::Box => Some(Shape::boxed(Rect::from_corners(anchor, current), &style.color, style.size, style.filled)),
        Tool::Blur => Some(Shape::blur(Rect::from_corners(anchor, current), style.size.saturating_mul(BLUR_PER_SIZE))),
        Tool::Select | Tool::Text | Tool::Step | Tool::Pen => None,
    }
}

/// Whether a rubber-band gesture travelled far enough to be intentional.
///
/// The pointer must have moved at least [`MIN_DRAG_PX`] from the anchor.
#[must_use]
pub fn exceeds_drag_threshold(tool: Tool, anchor: Point, current: Point) -> bool {
    let (dx, dy) = current.delta_from(anchor);
    tool.is_drag_shape() && dx.hypot(dy) >= MIN_DRAG_PX
}
