//! Editing session: the testable [`EngineCore`] and the browser-facing [`Engine`].
//!
//! `EngineCore` owns all editor state (scene, history, tool, gesture) and turns
//! pointer, key and toolbar input into scene mutations plus a list of
//! [`Action`]s for the host. It never touches the DOM. `Engine` wraps it with
//! the primary and overlay canvases and the pristine base image, handles the
//! render and resize actions itself, and hands the rest to JavaScript as JSON.

use std::mem;

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::color::normalize_hex_color;
use crate::config::{ConfigError, EditorConfig};
use crate::consts::{MAX_SIZE, MAX_TEXT_SIZE, MIN_PEN_POINTS};
use crate::doc::{Annotation, AnnotationId, AnnotationKind, DocStore, PenStroke, Scene, Shape, StepMarker, TextShape};
use crate::geom::{Point, Viewport};
use crate::hit;
use crate::history::History;
use crate::input::{
    Button, InputState, Key, Modifiers, Tool, UiState, UnknownTool, drag_shape, exceeds_drag_threshold,
};
use crate::mockup::{FrameSpec, MockupError};
use crate::render::{self, Backdrop};
use crate::source::{Handoff, PixelRect, SourceError, check_image_size, resolve_crop};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Frame(#[from] MockupError),
    #[error(transparent)]
    Tool(#[from] UnknownTool),
    #[error("canvas error: {0}")]
    Canvas(String),
}

impl EngineError {
    fn canvas(err: &JsValue) -> Self {
        Self::Canvas(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Primary and overlay surfaces are stale.
    RenderNeeded,
    AnnotationCreated { id: AnnotationId, kind: AnnotationKind },
    /// An existing annotation was moved or restyled.
    AnnotationUpdated { id: AnnotationId },
    AnnotationDeleted { id: AnnotationId },
    SelectionChanged { id: Option<AnnotationId> },
    /// Undo/redo availability after a history change.
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// Show a text prompt; answer with `submit_text` or `cancel_text`.
    TextRequested { x: f64, y: f64 },
    /// Both canvases must be resized to the new surface size.
    ResizeSurface { width: f64, height: f64 },
}

/// Core engine state: all logic that doesn't depend on the canvas elements.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct EngineCore {
    pub doc: DocStore,
    pub history: History,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
    pub frame: Option<FrameSpec>,
    image_width: f64,
    image_height: f64,
    next_step: u32,
}

impl EngineCore {
    /// Session for a base image of `image_width` x `image_height` pixels.
    #[must_use]
    pub fn new(image_width: f64, image_height: f64) -> Self {
        let mut core = Self {
            doc: DocStore::new(),
            history: History::new(),
            ui: UiState::default(),
            input: InputState::Idle,
            viewport: Viewport::default(),
            frame: None,
            image_width,
            image_height,
            next_step: 1,
        };
        let (w, h) = core.surface_size();
        core.viewport = Viewport { css_width: w, css_height: h, canvas_width: w, canvas_height: h };
        core
    }

    /// Session with the host's initial tool, style and frame.
    #[must_use]
    pub fn with_config(image_width: f64, image_height: f64, config: &EditorConfig) -> Self {
        let mut core = Self::new(image_width, image_height);
        core.ui.tool = config.tool;
        core.ui.style = config.stroke_style();
        core.set_frame(config.frame);
        core
    }

    // --- Geometry ---

    /// Size of both canvases: the image plus the frame's title bar.
    #[must_use]
    pub fn surface_size(&self) -> (f64, f64) {
        match self.frame {
            Some(frame) => frame.outer_size(self.image_width, self.image_height),
            None => (self.image_width, self.image_height),
        }
    }

    /// Offset of annotation space inside the surface.
    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.frame.map_or_else(Point::default, FrameSpec::content_offset)
    }

    #[must_use]
    pub fn image_size(&self) -> (f64, f64) {
        (self.image_width, self.image_height)
    }

    /// Record the canvas element's displayed CSS size.
    pub fn set_viewport(&mut self, css_width: f64, css_height: f64) {
        self.viewport.css_width = css_width;
        self.viewport.css_height = css_height;
    }

    /// Map an element-relative CSS point into image space.
    #[must_use]
    pub fn to_image_space(&self, css: Point) -> Point {
        let offset = self.content_offset();
        let canvas = self.viewport.to_canvas(css);
        Point::new(canvas.x - offset.x, canvas.y - offset.y)
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, css: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if let InputState::AwaitingText { .. } = self.input {
            log::warn!("pointer-down ignored while a text prompt is open");
            return Vec::new();
        }
        if self.input.is_active() {
            log::warn!("pointer-down while a gesture is open; abandoning it");
            self.abort_gesture();
        }
        let pt = self.to_image_space(css);

        match self.ui.tool {
            Tool::Select => self.start_select(pt),
            Tool::Step => {
                let marker = StepMarker {
                    x: pt.x,
                    y: pt.y,
                    number: self.next_step,
                    color: self.ui.style.color.clone(),
                    size: self.ui.style.size,
                };
                self.next_step += 1;
                self.commit_new(Shape::Step(marker))
            }
            Tool::Pen => {
                self.input = InputState::DrawingPen { points: vec![pt] };
                vec![Action::RenderNeeded]
            }
            Tool::Arrow | Tool::Box | Tool::Blur => {
                self.input = InputState::DrawingShape { tool: self.ui.tool, anchor: pt, current: pt };
                Vec::new()
            }
            Tool::Text => {
                self.input = InputState::AwaitingText { at: pt };
                vec![Action::TextRequested { x: pt.x, y: pt.y }]
            }
        }
    }

    pub fn on_pointer_move(&mut self, css: Point, _modifiers: Modifiers) -> Vec<Action> {
        let pt = self.to_image_space(css);
        match &mut self.input {
            InputState::DraggingAnnotation { id, anchor, original } => {
                let (dx, dy) = pt.delta_from(*anchor);
                if let Some(annotation) = self.doc.get_mut(id) {
                    annotation.shape = original.translated(dx, dy);
                }
                vec![Action::RenderNeeded]
            }
            InputState::DrawingShape { current, .. } => {
                *current = pt;
                vec![Action::RenderNeeded]
            }
            InputState::DrawingPen { points } => {
                points.push(pt);
                vec![Action::RenderNeeded]
            }
            InputState::Idle | InputState::AwaitingText { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, css: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || matches!(self.input, InputState::AwaitingText { .. }) {
            return Vec::new();
        }
        let pt = self.to_image_space(css);

        match mem::take(&mut self.input) {
            InputState::DraggingAnnotation { id, anchor, original } => self.finish_drag(id, anchor, &original, pt),
            InputState::DrawingShape { tool, anchor, .. } => {
                if !exceeds_drag_threshold(tool, anchor, pt) {
                    log::debug!("{} gesture below drag threshold, discarded", tool.as_str());
                    return vec![Action::RenderNeeded];
                }
                match drag_shape(tool, anchor, pt, &self.ui.style) {
                    Some(shape) => self.commit_new(shape),
                    None => vec![Action::RenderNeeded],
                }
            }
            InputState::DrawingPen { points } => {
                if points.len() <= MIN_PEN_POINTS {
                    log::debug!("pen stroke with {} points discarded", points.len());
                    return vec![Action::RenderNeeded];
                }
                let stroke =
                    PenStroke { points, color: self.ui.style.color.clone(), thickness: self.ui.style.size };
                self.commit_new(Shape::Pen(stroke))
            }
            InputState::Idle | InputState::AwaitingText { .. } => Vec::new(),
        }
    }

    fn start_select(&mut self, pt: Point) -> Vec<Action> {
        let hit = hit::hit_test(pt, &self.doc);
        if let Some(id) = hit {
            if let Some(annotation) = self.doc.get(&id) {
                self.input = InputState::DraggingAnnotation { id, anchor: pt, original: annotation.shape.clone() };
            }
        }
        if self.ui.selected_id == hit {
            return Vec::new();
        }
        self.ui.selected_id = hit;
        vec![Action::SelectionChanged { id: hit }, Action::RenderNeeded]
    }

    /// End a drag. One snapshot, and only when the shape actually moved, so a
    /// plain click to select never truncates the redo branch.
    fn finish_drag(&mut self, id: AnnotationId, anchor: Point, original: &Shape, pt: Point) -> Vec<Action> {
        let (dx, dy) = pt.delta_from(anchor);
        let Some(annotation) = self.doc.get_mut(&id) else {
            return vec![Action::RenderNeeded];
        };
        annotation.shape = original.translated(dx, dy);
        if annotation.shape == *original {
            return Vec::new();
        }
        log::debug!("moved {id} by ({dx}, {dy})");
        let mut actions = vec![Action::AnnotationUpdated { id }];
        actions.extend(self.record());
        actions
    }

    // --- Text prompt ---

    /// Answer a [`Action::TextRequested`] prompt. Blank text places nothing.
    pub fn submit_text(&mut self, text: &str) -> Vec<Action> {
        let InputState::AwaitingText { at } = self.input else {
            log::warn!("text submitted without a pending prompt");
            return Vec::new();
        };
        self.input = InputState::Idle;
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let label = TextShape {
            x: at.x,
            y: at.y,
            text: text.to_owned(),
            color: self.ui.style.color.clone(),
            size: self.ui.style.size.min(MAX_TEXT_SIZE),
        };
        self.commit_new(Shape::Text(label))
    }

    /// Dismiss a pending text prompt.
    pub fn cancel_text(&mut self) -> Vec<Action> {
        if let InputState::AwaitingText { .. } = self.input {
            self.input = InputState::Idle;
        }
        Vec::new()
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let name = key.0.as_str();
        if matches!(self.input, InputState::AwaitingText { .. }) {
            return if name == "Escape" { self.cancel_text() } else { Vec::new() };
        }
        match name {
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => self.escape(),
            k if modifiers.command() && k.eq_ignore_ascii_case("z") => {
                if modifiers.shift {
                    self.redo()
                } else {
                    self.undo()
                }
            }
            k if modifiers.command() && k.eq_ignore_ascii_case("y") => self.redo(),
            _ => Vec::new(),
        }
    }

    /// Abort the gesture in progress, or drop the selection when idle.
    fn escape(&mut self) -> Vec<Action> {
        if self.input.is_active() {
            self.abort_gesture();
            return vec![Action::RenderNeeded];
        }
        self.clear_selection()
    }

    /// Drop any in-progress gesture. A dragged annotation goes back to where
    /// it started.
    fn abort_gesture(&mut self) {
        if let InputState::DraggingAnnotation { id, original, .. } = mem::take(&mut self.input) {
            if let Some(annotation) = self.doc.get_mut(&id) {
                annotation.shape = original;
            }
        }
    }

    fn clear_selection(&mut self) -> Vec<Action> {
        if self.ui.selected_id.take().is_some() {
            vec![Action::SelectionChanged { id: None }, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        if self.gesture_in_progress("undo") {
            return Vec::new();
        }
        match self.history.undo() {
            Some(scene) => self.install(scene),
            None => Vec::new(),
        }
    }

    pub fn redo(&mut self) -> Vec<Action> {
        if self.gesture_in_progress("redo") {
            return Vec::new();
        }
        match self.history.redo() {
            Some(scene) => self.install(scene),
            None => Vec::new(),
        }
    }

    fn install(&mut self, scene: Scene) -> Vec<Action> {
        self.doc.replace(scene);
        let mut actions = self.clear_selection();
        actions.push(self.history_changed());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn gesture_in_progress(&self, what: &str) -> bool {
        let busy = self.input.is_active();
        if busy {
            log::warn!("{what} ignored while a gesture is in progress");
        }
        busy
    }

    /// Snapshot the live scene after a completed edit.
    fn record(&mut self) -> Vec<Action> {
        self.history.snapshot(&self.doc.scene());
        vec![self.history_changed(), Action::RenderNeeded]
    }

    fn history_changed(&self) -> Action {
        Action::HistoryChanged { can_undo: self.history.can_undo(), can_redo: self.history.can_redo() }
    }

    fn commit_new(&mut self, shape: Shape) -> Vec<Action> {
        let annotation = Annotation::new(shape);
        let (id, kind) = (annotation.id, annotation.kind());
        log::debug!("created {kind:?} {id}");
        self.doc.add(annotation);
        let mut actions = vec![Action::AnnotationCreated { id, kind }];
        actions.extend(self.record());
        actions
    }

    // --- Selection / tools ---

    /// Remove the selected annotation.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.gesture_in_progress("delete") {
            return Vec::new();
        }
        let Some(id) = self.ui.selected_id.take() else {
            return Vec::new();
        };
        if self.doc.remove(&id).is_none() {
            return vec![Action::SelectionChanged { id: None }, Action::RenderNeeded];
        }
        let mut actions = vec![Action::AnnotationDeleted { id }, Action::SelectionChanged { id: None }];
        actions.extend(self.record());
        actions
    }

    /// Switch tools. Cancels any pending gesture and clears the selection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.abort_gesture();
        self.ui.tool = tool;
        let mut actions = self.clear_selection();
        if actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Property panel ---

    /// Set the stroke color; also recolors the selection.
    pub fn set_color(&mut self, color: &str) -> Vec<Action> {
        let color = normalize_hex_color(color, &self.ui.style.color);
        self.ui.style.color.clone_from(&color);
        self.apply_to_selection(|shape| shape.set_color(&color))
    }

    /// Set the shared size control; also resizes the selection.
    pub fn set_size(&mut self, size: u32) -> Vec<Action> {
        self.ui.style.size = size.clamp(1, MAX_SIZE);
        self.apply_to_selection(|shape| shape.set_size(size))
    }

    /// Set box fill; also applies to a selected box.
    pub fn set_filled(&mut self, filled: bool) -> Vec<Action> {
        self.ui.style.filled = filled;
        self.apply_to_selection(|shape| shape.set_filled(filled))
    }

    fn apply_to_selection(&mut self, edit: impl FnOnce(&mut Shape) -> bool) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        let Some(annotation) = self.doc.get_mut(&id) else {
            return Vec::new();
        };
        if !edit(&mut annotation.shape) {
            return Vec::new();
        }
        let mut actions = vec![Action::AnnotationUpdated { id }];
        actions.extend(self.record());
        actions
    }

    // --- Frame ---

    /// Enable, change or disable the decorative frame.
    pub fn set_frame(&mut self, frame: Option<FrameSpec>) -> Vec<Action> {
        if self.frame == frame {
            return Vec::new();
        }
        self.frame = frame;
        let (width, height) = self.surface_size();
        self.viewport.resize_canvas(width, height);
        log::debug!("frame {frame:?}, surface {width}x{height}");
        vec![Action::ResizeSurface { width, height }, Action::RenderNeeded]
    }

    // --- Export ---

    /// Put the surfaces into export state: no gesture, no selection.
    pub fn prepare_export(&mut self) -> Vec<Action> {
        self.abort_gesture();
        let mut actions = self.clear_selection();
        actions.push(Action::RenderNeeded);
        actions
    }

}

/// `screenshot-<timestamp>.png` from an ISO-8601 timestamp, with characters
/// that are awkward in file names replaced.
#[must_use]
pub fn export_file_name(iso_timestamp: &str) -> String {
    let stamp: String = iso_timestamp
        .chars()
        .take_while(|c| *c != '.' && *c != 'Z')
        .map(|c| if c == ':' || c == 'T' { '-' } else { c })
        .collect();
    format!("screenshot-{stamp}.png")
}

fn actions_json(actions: &[Action]) -> String {
    serde_json::to_string(actions).unwrap_or_else(|err| {
        log::error!("failed to encode actions: {err}");
        "[]".to_owned()
    })
}

#[cfg(target_arch = "wasm32")]
fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already installed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(_level: log::Level) {}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, EngineError> {
    canvas
        .get_context("2d")
        .map_err(|e| EngineError::canvas(&e))?
        .ok_or_else(|| EngineError::Canvas("2d context unavailable".to_owned()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EngineError::Canvas("unexpected context type".to_owned()))
}

/// Copy the (cropped) capture into an offscreen canvas. Blur regions
/// re-sample from this canvas, which is never drawn on again.
fn base_canvas(image: &HtmlImageElement, crop: PixelRect) -> Result<HtmlCanvasElement, EngineError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| EngineError::Canvas("no document".to_owned()))?;
    let canvas = document
        .create_element("canvas")
        .map_err(|e| EngineError::canvas(&e))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EngineError::Canvas("created element is not a canvas".to_owned()))?;
    canvas.set_width(crop.width);
    canvas.set_height(crop.height);
    let (x, y, w, h) = (f64::from(crop.x), f64::from(crop.y), f64::from(crop.width), f64::from(crop.height));
    context_2d(&canvas)?
        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(image, x, y, w, h, 0.0, 0.0, w, h)
        .map_err(|e| EngineError::canvas(&e))?;
    Ok(canvas)
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvases.
#[wasm_bindgen]
pub struct Engine {
    primary_canvas: HtmlCanvasElement,
    overlay_canvas: HtmlCanvasElement,
    primary: CanvasRenderingContext2d,
    overlay: CanvasRenderingContext2d,
    base: HtmlCanvasElement,
    core: EngineCore,
}

#[wasm_bindgen]
impl Engine {
    /// Start a session on a decoded capture.
    ///
    /// `handoff_json` is the stored capture payload and `config_json` the
    /// editor defaults (may be empty).
    ///
    /// # Errors
    ///
    /// Fails if the configuration or payload is malformed, the image has no
    /// pixels, or a canvas cannot be set up.
    #[wasm_bindgen(constructor)]
    pub fn new(
        primary_canvas: HtmlCanvasElement,
        overlay_canvas: HtmlCanvasElement,
        image: &HtmlImageElement,
        handoff_json: &str,
        config_json: &str,
    ) -> Result<Engine, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(EngineError::from)?;
        init_logging(config.level().map_err(EngineError::from)?);

        let handoff = Handoff::from_json(handoff_json).map_err(EngineError::from)?;
        let (natural_w, natural_h) = (image.natural_width(), image.natural_height());
        check_image_size(natural_w, natural_h).map_err(EngineError::from)?;

        let full = PixelRect { x: 0, y: 0, width: natural_w, height: natural_h };
        let crop = match handoff.crop {
            Some(crop) => resolve_crop(crop, handoff.device_pixel_ratio, natural_w, natural_h).unwrap_or_else(|err| {
                log::warn!("{err}; using the full capture");
                full
            }),
            None => full,
        };

        let base = base_canvas(image, crop)?;
        let primary = context_2d(&primary_canvas)?;
        let overlay = context_2d(&overlay_canvas)?;
        let core = EngineCore::with_config(f64::from(crop.width), f64::from(crop.height), &config);

        log::info!("editor session started: {:?} capture, {}x{}", handoff.mode, crop.width, crop.height);
        let engine = Self { primary_canvas, overlay_canvas, primary, overlay, base, core };
        engine.resize_canvases();
        engine.render()?;
        Ok(engine)
    }

    // --- Render ---

    /// Draw the current state to both canvases.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a canvas call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let (width, height) = self.core.image_size();
        let backdrop = Backdrop { image: &self.base, width, height, frame: self.core.frame };
        render::draw(&self.primary, &backdrop, &self.core.doc)?;
        render::draw_overlay(
            &self.overlay,
            self.core.surface_size(),
            self.core.content_offset(),
            &self.core.doc,
            &self.core.ui,
            &self.core.input,
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize_canvases(&self) {
        let (width, height) = self.core.surface_size();
        for canvas in [&self.primary_canvas, &self.overlay_canvas] {
            canvas.set_width(width.round() as u32);
            canvas.set_height(height.round() as u32);
        }
    }

    /// Apply render/resize actions locally and hand the list to the host.
    fn dispatch(&self, actions: &[Action]) -> String {
        let mut needs_render = false;
        for action in actions {
            match action {
                Action::ResizeSurface { .. } => {
                    self.resize_canvases();
                    needs_render = true;
                }
                Action::RenderNeeded => needs_render = true,
                _ => {}
            }
        }
        if needs_render {
            if let Err(err) = self.render() {
                log::error!("render failed: {err:?}");
            }
        }
        actions_json(actions)
    }

    // --- Input events ---

    /// Displayed CSS size of the canvases.
    pub fn set_viewport(&mut self, css_width: f64, css_height: f64) {
        self.core.set_viewport(css_width, css_height);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> String {
        let actions = self.core.on_pointer_down(Point::new(x, y), Button::from_dom(button), Modifiers::from_mask(modifiers));
        self.dispatch(&actions)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, modifiers: u8) -> String {
        let actions = self.core.on_pointer_move(Point::new(x, y), Modifiers::from_mask(modifiers));
        self.dispatch(&actions)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> String {
        let actions = self.core.on_pointer_up(Point::new(x, y), Button::from_dom(button), Modifiers::from_mask(modifiers));
        self.dispatch(&actions)
    }

    pub fn key_down(&mut self, key: &str, modifiers: u8) -> String {
        let actions = self.core.on_key_down(&Key(key.to_owned()), Modifiers::from_mask(modifiers));
        self.dispatch(&actions)
    }

    pub fn submit_text(&mut self, text: &str) -> String {
        let actions = self.core.submit_text(text);
        self.dispatch(&actions)
    }

    pub fn cancel_text(&mut self) -> String {
        let actions = self.core.cancel_text();
        self.dispatch(&actions)
    }

    // --- Toolbar ---

    /// # Errors
    ///
    /// Returns `Err` for an unknown tool name.
    pub fn set_tool(&mut self, name: &str) -> Result<String, JsValue> {
        let tool = name.parse::<Tool>().map_err(EngineError::from)?;
        let actions = self.core.set_tool(tool);
        Ok(self.dispatch(&actions))
    }

    pub fn set_color(&mut self, color: &str) -> String {
        let actions = self.core.set_color(color);
        self.dispatch(&actions)
    }

    pub fn set_size(&mut self, size: u32) -> String {
        let actions = self.core.set_size(size);
        self.dispatch(&actions)
    }

    pub fn set_filled(&mut self, filled: bool) -> String {
        let actions = self.core.set_filled(filled);
        self.dispatch(&actions)
    }

    pub fn undo(&mut self) -> String {
        let actions = self.core.undo();
        self.dispatch(&actions)
    }

    pub fn redo(&mut self) -> String {
        let actions = self.core.redo();
        self.dispatch(&actions)
    }

    pub fn delete_selected(&mut self) -> String {
        let actions = self.core.delete_selected();
        self.dispatch(&actions)
    }

    /// # Errors
    ///
    /// Returns `Err` for an unknown style or theme name.
    pub fn set_frame(&mut self, style: &str, theme: &str) -> Result<String, JsValue> {
        let frame = FrameSpec::parse(style, theme).map_err(EngineError::from)?;
        let actions = self.core.set_frame(Some(frame));
        Ok(self.dispatch(&actions))
    }

    pub fn clear_frame(&mut self) -> String {
        let actions = self.core.set_frame(None);
        self.dispatch(&actions)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.core.history.can_redo()
    }

    // --- Export ---

    /// Flatten the primary canvas to a PNG data URL, without selection UI.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot be rendered or encoded. The session
    /// stays editable.
    pub fn export_png_data_url(&mut self) -> Result<String, JsValue> {
        self.core.prepare_export();
        self.render()?;
        let url = self.primary_canvas.to_data_url_with_type("image/png")?;
        log::info!("exported {} annotations", self.core.doc.len());
        Ok(url)
    }

    #[must_use]
    pub fn suggested_file_name(&self) -> String {
        let now = js_sys::Date::new_0();
        export_file_name(&String::from(now.to_iso_string()))
    }
}
