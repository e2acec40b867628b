//! Document model: annotation kinds, their fields, and the ordered store.
//!
//! An [`Annotation`] pairs a stable [`AnnotationId`] with a [`Shape`], the
//! tagged union over every markup primitive the editor supports. The store
//! ([`DocStore`]) keeps annotations in paint order: later entries draw on top
//! and win hit-test ties. A [`Scene`] is a plain owned copy of that list and
//! is what the history stack snapshots.
//!
//! All coordinates are base-image pixels. Shapes never change variant once
//! created; drag and property edits only rewrite fields.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    BLUR_PER_SIZE, MAX_SIZE, MAX_TEXT_SIZE, STEP_RADIUS_BASE, STEP_RADIUS_STEP, TEXT_SIZE_BASE, TEXT_SIZE_STEP,
};
use crate::geom::{Point, Rect};

/// Unique identifier for an annotation.
pub type AnnotationId = Uuid;

/// Ordered annotation list; index order is z-order.
pub type Scene = Vec<Annotation>;

/// The kind of an annotation, without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Arrow,
    Box,
    Text,
    Blur,
    Step,
    Pen,
}

/// A straight arrow from `(x1, y1)` to the head at `(x2, y2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub thickness: u32,
}

/// Rectangle outline, or solid rectangle when `filled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub thickness: u32,
    pub filled: bool,
}

/// Single-line text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: String,
    pub size: u32,
}

impl TextShape {
    /// Pixel font size derived from the size step.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        f64::from(self.size).mul_add(TEXT_SIZE_STEP, TEXT_SIZE_BASE)
    }
}

/// Region that shows the base image blurred by `intensity` pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlurShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub intensity: u32,
}

/// Numbered circular marker centered at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMarker {
    pub x: f64,
    pub y: f64,
    pub number: u32,
    pub color: String,
    pub size: u32,
}

impl StepMarker {
    #[must_use]
    pub fn radius(&self) -> f64 {
        f64::from(self.size).mul_add(STEP_RADIUS_STEP, STEP_RADIUS_BASE)
    }
}

/// Freehand stroke through `points` in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenStroke {
    pub points: Vec<Point>,
    pub color: String,
    pub thickness: u32,
}

/// Tagged union over every annotation kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Arrow(ArrowShape),
    Box(BoxShape),
    Text(TextShape),
    Blur(BlurShape),
    Step(StepMarker),
    Pen(PenStroke),
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Arrow(_) => AnnotationKind::Arrow,
            Self::Box(_) => AnnotationKind::Box,
            Self::Text(_) => AnnotationKind::Text,
            Self::Blur(_) => AnnotationKind::Blur,
            Self::Step(_) => AnnotationKind::Step,
            Self::Pen(_) => AnnotationKind::Pen,
        }
    }

    /// Copy of this shape moved by `(dx, dy)`.
    ///
    /// Drags call this on the pre-drag copy with the cumulative pointer delta,
    /// so the result never depends on how many move events arrived.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Shape {
        let mut out = self.clone();
        match &mut out {
            Self::Arrow(a) => {
                a.x1 += dx;
                a.y1 += dy;
                a.x2 += dx;
                a.y2 += dy;
            }
            Self::Pen(p) => {
                for pt in &mut p.points {
                    *pt = pt.offset(dx, dy);
                }
            }
            Self::Box(BoxShape { x, y, .. })
            | Self::Text(TextShape { x, y, .. })
            | Self::Blur(BlurShape { x, y, .. })
            | Self::Step(StepMarker { x, y, .. }) => {
                *x += dx;
                *y += dy;
            }
        }
        out
    }

    /// Apply a color from the property panel. Returns `false` for kinds
    /// without a color or when nothing changed.
    pub fn set_color(&mut self, color: &str) -> bool {
        let slot = match self {
            Self::Arrow(a) => &mut a.color,
            Self::Box(b) => &mut b.color,
            Self::Text(t) => &mut t.color,
            Self::Step(s) => &mut s.color,
            Self::Pen(p) => &mut p.color,
            Self::Blur(_) => return false,
        };
        if slot == color {
            return false;
        }
        color.clone_into(slot);
        true
    }

    /// Apply the shared size control. Thickness for strokes, size step for
    /// text and step markers, blur radius for blur regions. Returns `false`
    /// when nothing changed.
    pub fn set_size(&mut self, size: u32) -> bool {
        let size = size.clamp(1, MAX_SIZE);
        let (slot, value) = match self {
            Self::Arrow(a) => (&mut a.thickness, size),
            Self::Box(b) => (&mut b.thickness, size),
            Self::Pen(p) => (&mut p.thickness, size),
            Self::Text(t) => (&mut t.size, size.min(MAX_TEXT_SIZE)),
            Self::Step(s) => (&mut s.size, size),
            Self::Blur(b) => (&mut b.intensity, size.saturating_mul(BLUR_PER_SIZE)),
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Toggle box fill. Returns `false` for other kinds or when unchanged.
    pub fn set_filled(&mut self, filled: bool) -> bool {
        match self {
            Self::Box(b) if b.filled != filled => {
                b.filled = filled;
                true
            }
            _ => false,
        }
    }

    /// Whether the shape has enough extent to draw anything.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        match self {
            Self::Arrow(a) => a.x1 != a.x2 || a.y1 != a.y2,
            Self::Box(BoxShape { width, height, .. }) | Self::Blur(BlurShape { width, height, .. }) => {
                *width > 0.0 && *height > 0.0
            }
            Self::Text(t) => !t.text.is_empty(),
            Self::Step(_) => true,
            Self::Pen(p) => p.points.len() >= 2,
        }
    }

    /// Box shape spanning `rect`.
    #[must_use]
    pub fn boxed(rect: Rect, color: &str, thickness: u32, filled: bool) -> Shape {
        Self::Box(BoxShape {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: color.to_owned(),
            thickness,
            filled,
        })
    }

    /// Blur region spanning `rect`.
    #[must_use]
    pub fn blur(rect: Rect, intensity: u32) -> Shape {
        Self::Blur(BlurShape { x: rect.x, y: rect.y, width: rect.width, height: rect.height, intensity })
    }
}

/// An annotation record as stored in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Identity used by selection and removal.
    pub id: AnnotationId,
    /// Kind-specific fields, serialized inline with a `type` tag.
    #[serde(flatten)]
    pub shape: Shape,
}

impl Annotation {
    /// Wrap a shape with a fresh identifier.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { id: Uuid::new_v4(), shape }
    }

    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }
}

/// In-memory ordered store of annotations.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    annotations: Vec<Annotation>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { annotations: Vec::new() }
    }

    /// Append an annotation on top of the z-order.
    pub fn add(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Remove an annotation by id, returning it if it was present.
    pub fn remove(&mut self, id: &AnnotationId) -> Option<Annotation> {
        let idx = self.annotations.iter().position(|a| a.id == *id)?;
        Some(self.annotations.remove(idx))
    }

    /// Return a reference to an annotation by id.
    #[must_use]
    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == *id)
    }

    /// Mutable access for in-place edits. Callers snapshot once the edit is
    /// complete.
    pub fn get_mut(&mut self, id: &AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == *id)
    }

    /// Annotations in paint order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// Deep copy of the current scene.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.annotations.clone()
    }

    /// Replace the whole scene, e.g. with a history snapshot.
    pub fn replace(&mut self, scene: Scene) {
        self.annotations = scene;
    }

    /// Number of annotations currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if the store contains no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
