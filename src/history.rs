//! Snapshot-based undo/redo.
//!
//! History is a linear sequence of full scene copies plus a cursor. The entry
//! under the cursor mirrors the live scene. Index 0 is always the empty
//! scene, so undoing past every edit lands on a blank canvas instead of
//! failing. Recording after an undo discards the redo branch.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::doc::Scene;

/// Linear undo/redo stack of scene snapshots.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Scene>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self { snapshots: vec![Scene::new()], cursor: 0 }
    }
}

impl History {
    /// History holding only the empty baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `scene` as the newest state, truncating any redo branch.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(scene.clone());
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. `None` at the baseline.
    pub fn undo(&mut self) -> Option<Scene> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward one snapshot. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<Scene> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Index of the active snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots, including the baseline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: the baseline is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
