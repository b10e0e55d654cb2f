//! The action log: an ordered list of actions plus a history cursor.
//!
//! Entries up to and including the cursor are visible and replayed in order;
//! entries after it are only reachable through redo. Appending while the
//! cursor sits below the end discards that redo tail (linear undo). Undo and
//! redo only ever move the cursor; sealed entries are never edited.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use log::debug;

use crate::action::Action;

/// Ordered drawing actions with a movable cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLog {
    actions: Vec<Action>,
    /// Number of visible entries, i.e. `cursor + 1`.
    visible: usize,
}

impl ActionLog {
    /// Create an empty log (cursor at -1).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from stored entries. `visible` must not exceed `actions.len()`.
    #[must_use]
    pub fn from_parts(actions: Vec<Action>, visible: usize) -> Option<Self> {
        (visible <= actions.len()).then_some(Self { actions, visible })
    }

    /// Drop the redo tail, push `action`, and move the cursor onto it.
    ///
    /// Any open action at the old cursor is sealed first. Returns the new index.
    pub fn append(&mut self, action: Action) -> usize {
        self.seal_open_tail();
        let dropped = self.actions.len() - self.visible;
        if dropped > 0 {
            debug!("history: discarding {dropped} redo entries");
        }
        self.actions.truncate(self.visible);
        self.actions.push(action);
        self.visible = self.actions.len();
        self.visible - 1
    }

    /// Append `action` marked as open.
    pub fn begin_open(&mut self, mut action: Action) -> usize {
        action.set_open(true);
        self.append(action)
    }

    /// Apply `f` to the action at the cursor iff it is open.
    ///
    /// Returns whether `f` ran. A stray update after release is silently ignored.
    pub fn mutate_open_tail<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Action),
    {
        match self.tail_mut() {
            Some(action) if action.is_open() => {
                f(action);
                true
            }
            _ => false,
        }
    }

    /// Seal the action at the cursor if it is open. Idempotent.
    pub fn seal_open_tail(&mut self) -> bool {
        match self.tail_mut() {
            Some(action) if action.is_open() => {
                action.set_open(false);
                true
            }
            _ => false,
        }
    }

    /// Step the cursor back one entry. No-op at -1.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.seal_open_tail();
        self.visible -= 1;
        debug!("history: undo -> cursor {}", self.history_index());
        true
    }

    /// Step the cursor forward one entry. No-op at the end.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.visible += 1;
        debug!("history: redo -> cursor {}", self.history_index());
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.visible > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.visible < self.actions.len()
    }

    /// Cursor position; `None` when nothing is visible.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.visible.checked_sub(1)
    }

    /// Cursor as a signed index (`-1` when nothing is visible).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn history_index(&self) -> i64 {
        self.visible as i64 - 1
    }

    /// Entries `0..=cursor`, in order.
    #[must_use]
    pub fn visible(&self) -> &[Action] {
        &self.actions[..self.visible]
    }

    /// Every entry, including the redo tail.
    #[must_use]
    pub fn entries(&self) -> &[Action] {
        &self.actions
    }

    /// The action at the cursor, if it is open.
    #[must_use]
    pub fn open_tail(&self) -> Option<&Action> {
        self.cursor().and_then(|i| self.actions.get(i)).filter(|a| a.is_open())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn tail_mut(&mut self) -> Option<&mut Action> {
        let cursor = self.cursor()?;
        self.actions.get_mut(cursor)
    }
}
