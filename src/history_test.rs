use super::*;
use crate::doc::{Annotation, Shape, StepMarker};

impl History {
    fn current(&self) -> &Scene {
        &self.snapshots[self.cursor]
    }
}

fn step(n: u32) -> Annotation {
    Annotation::new(Shape::Step(StepMarker { x: 0.0, y: 0.0, number: n, color: "#ff0000".into(), size: 2 }))
}

/// Apply `n` edits, snapshotting after each, and return every scene.
fn build(history: &mut History, n: u32) -> Vec<Scene> {
    let mut scene = Scene::new();
    let mut out = Vec::new();
    for i in 1..=n {
        scene.push(step(i));
        history.snapshot(&scene);
        out.push(scene.clone());
    }
    out
}

// =============================================================
// Baseline
// =============================================================

#[test]
fn new_history_has_empty_baseline() {
    let h = History::new();
    assert_eq!(h.len(), 1);
    assert_eq!(h.cursor(), 0);
    assert!(h.current().is_empty());
    assert!(!h.is_empty());
}

#[test]
fn undo_at_baseline_is_noop() {
    let mut h = History::new();
    assert!(h.undo().is_none());
    assert_eq!(h.cursor(), 0);
    assert!(!h.can_undo());
}

#[test]
fn redo_at_end_is_noop() {
    let mut h = History::new();
    build(&mut h, 2);
    assert!(h.redo().is_none());
    assert_eq!(h.cursor(), 2);
    assert!(!h.can_redo());
}

#[test]
fn undo_past_every_edit_returns_blank_scene() {
    let mut h = History::new();
    build(&mut h, 3);
    let mut last = None;
    while let Some(scene) = h.undo() {
        last = Some(scene);
    }
    assert_eq!(last, Some(Scene::new()));
    assert_eq!(h.cursor(), 0);
}

// =============================================================
// Snapshot / undo / redo
// =============================================================

#[test]
fn snapshot_advances_cursor_to_end() {
    let mut h = History::new();
    build(&mut h, 3);
    assert_eq!(h.len(), 4);
    assert_eq!(h.cursor(), 3);
}

#[test]
fn undo_returns_previous_scene() {
    let mut h = History::new();
    let scenes = build(&mut h, 2);
    assert_eq!(h.undo(), Some(scenes[0].clone()));
}

#[test]
fn undo_then_redo_same_count_restores_scene() {
    for undos in 1..=4 {
        let mut h = History::new();
        let scenes = build(&mut h, 4);
        let before = h.current().clone();
        for _ in 0..undos {
            h.undo();
        }
        let mut restored = None;
        for _ in 0..undos {
            restored = h.redo();
        }
        assert_eq!(restored.as_ref(), Some(&before));
        assert_eq!(&before, scenes.last().unwrap());
    }
}

#[test]
fn snapshot_after_undo_discards_redo_branch() {
    let mut h = History::new();
    let scenes = build(&mut h, 3);
    h.undo();
    h.undo();
    let mut branch = scenes[0].clone();
    branch.push(step(99));
    h.snapshot(&branch);
    assert!(!h.can_redo());
    assert!(h.redo().is_none());
    assert_eq!(h.len(), 3);
    assert_eq!(h.current(), &branch);
}

#[test]
fn snapshot_after_undo_to_baseline_keeps_baseline() {
    let mut h = History::new();
    build(&mut h, 2);
    h.undo();
    h.undo();
    h.snapshot(&vec![step(1)]);
    assert_eq!(h.len(), 2);
    assert_eq!(h.undo(), Some(Scene::new()));
}

#[test]
fn stored_snapshot_unaffected_by_later_mutation() {
    let mut h = History::new();
    let mut scene = vec![step(1)];
    h.snapshot(&scene);
    scene[0].shape.set_color("#000000");
    assert_eq!(h.current()[0].shape.color(), Some("#ff0000"));
}

#[test]
fn returned_scene_is_independent_copy() {
    let mut h = History::new();
    build(&mut h, 2);
    let mut undone = h.undo().unwrap();
    undone[0].shape.set_color("#000000");
    assert_eq!(h.current()[0].shape.color(), Some("#ff0000"));
}
