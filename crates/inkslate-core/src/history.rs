//! Undo/redo history of scene snapshots.

use crate::scene::Scene;
use crate::shapes::Shape;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A deep copy of the scene's shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    shapes: Vec<Shape>,
}

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            shapes: scene.shapes().to_vec(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Bounded undo stack plus redo stack.
///
/// The undo stack always holds at least one entry: the state the history
/// was created with, or the oldest state still retained. Its top mirrors the
/// scene as of the last checkpoint.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Start a history whose baseline is the given scene.
    pub fn new(baseline: &Scene) -> Self {
        let mut undo_stack = VecDeque::with_capacity(MAX_UNDO_HISTORY);
        undo_stack.push_back(Snapshot::capture(baseline));
        Self {
            undo_stack,
            redo_stack: Vec::new(),
        }
    }

    /// Record the scene after a committed edit. Clears the redo stack.
    pub fn checkpoint(&mut self, scene: &Scene) {
        self.undo_stack.push_back(Snapshot::capture(scene));
        while self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Step back. Returns the snapshot to restore, or `None` at the baseline.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let top = self.undo_stack.pop_back()?;
        self.redo_stack.push(top);
        self.undo_stack.back()
    }

    /// Step forward. Returns the snapshot to restore, or `None` when nothing was undone.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(next);
        while self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.pop_front();
        }
        self.undo_stack.back()
    }

    /// The state as of the last checkpoint.
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
