//! Undo/redo management for style edits.
//!
//! Provides:
//! - `UndoManager` trait for abstracting undo implementations
//! - `History<Op>` - bounded undo/redo stacks that implementations record into

use std::collections::VecDeque;

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Perform undo. Returns true if successful.
    fn undo(&mut self) -> bool;

    /// Perform redo. Returns true if successful.
    fn redo(&mut self) -> bool;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);
}

/// Bounded undo and redo stacks of recorded operations.
///
/// Recording a new operation clears the redo stack; once more than
/// `max_steps` operations are recorded the oldest one is dropped.
#[derive(Debug, Clone)]
pub struct History<Op> {
    undo_stack: VecDeque<Op>,
    redo_stack: Vec<Op>,
    max_steps: usize,
}

impl<Op> Default for History<Op> {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<Op> History<Op> {
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn record(&mut self, op: Op) {
        // Clear redo stack on new edit
        self.redo_stack.clear();
        self.undo_stack.push_back(op);

        // Trim if over max
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.pop_front();
        }
    }

    /// Pop the most recent operation for undoing.
    ///
    /// The caller applies its inverse and hands it back with [`Self::push_redo`].
    pub fn pop_undo(&mut self) -> Option<Op> {
        self.undo_stack.pop_back()
    }

    pub fn push_redo(&mut self, op: Op) {
        self.redo_stack.push(op);
    }

    /// Pop the most recently undone operation for redoing.
    ///
    /// The caller re-applies it and hands it back with [`Self::push_undo`].
    pub fn pop_redo(&mut self) -> Option<Op> {
        self.redo_stack.pop()
    }

    /// Return a redone operation without clearing the redo stack.
    pub fn push_undo(&mut self, op: Op) {
        self.undo_stack.push_back(op);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_clears_redo() {
        let mut history = History::new(10);
        history.record(1);
        let op = history.pop_undo().unwrap();
        history.push_redo(op);
        assert!(history.can_redo());

        // New edit should clear redo
        history.record(2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_max_steps() {
        let mut history = History::new(3);
        for op in ["a", "b", "c", "d"] {
            history.record(op); // "d" evicts "a"
        }

        assert_eq!(history.pop_undo(), Some("d"));
        assert_eq!(history.pop_undo(), Some("c"));
        assert_eq!(history.pop_undo(), Some("b"));
        assert_eq!(history.pop_undo(), None);
    }

    #[test]
    fn test_redo_round_trip_keeps_order() {
        let mut history = History::new(10);
        history.record(1);
        history.record(2);

        let op = history.pop_undo().unwrap();
        history.push_redo(op);
        let op = history.pop_redo().unwrap();
        assert_eq!(op, 2);
        history.push_undo(op);

        assert!(!history.can_redo());
        assert_eq!(history.pop_undo(), Some(2));
    }
}
