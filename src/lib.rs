//! Annotation engine for the screenshot editor.
//!
//! This crate is compiled to WebAssembly and runs in the extension's editor
//! page. It owns the editing session: the annotation scene, undo/redo
//! history, translating raw pointer and key events into scene mutations,
//! hit-testing, and compositing the base image, the optional decorative frame
//! and every annotation onto the primary and overlay canvases. The host page
//! decodes the captured image, wires DOM events to [`engine::Engine`], and
//! reacts to the returned [`engine::Action`]s (text prompts, downloads).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser-facing engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Annotation types and the ordered annotation store |
//! | [`history`] | Snapshot-based undo/redo stack |
//! | [`input`] | Tools, key/modifier types and the gesture state machine |
//! | [`bounds`] | Axis-aligned bounds per annotation kind |
//! | [`hit`] | Hit-testing against the scene |
//! | [`render`] | Primary and overlay compositing behind the [`render::Surface`] trait |
//! | [`mockup`] | Decorative device frames (title bar, window controls) |
//! | [`source`] | Capture hand-off payload and crop resolution |
//! | [`config`] | Editor defaults supplied by the host |
//! | [`geom`] | Points, rectangles and CSS-to-canvas conversion |
//! | [`color`] | Hex color parsing and normalization |
//! | [`consts`] | Shared numeric constants (hit padding, size formulas, etc.) |

pub mod bounds;
pub mod color;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod history;
pub mod input;
pub mod mockup;
pub mod render;
#[cfg(test)]
#[path = "recording_test.rs"]
pub(crate) mod recording;
pub mod source;
