//! Bounded undo/redo history over one flat text buffer.

use std::collections::VecDeque;

/// Maximum number of undo entries retained; the oldest is evicted first.
pub const UNDO_CAPACITY: usize = 50;

/// Dual-stack history for a single continuously-edited document.
///
/// Independent of the block tree — it guards one flat content value, such
/// as a code block's raw source. Operations take `&mut self`, so each
/// manager instance is a critical section by construction; sharing one
/// across threads requires the caller to add its own mutual exclusion.
#[derive(Debug, Clone)]
pub struct UndoManager {
    current: String,
    undo: VecDeque<String>,
    redo: Vec<String>,
}

impl UndoManager {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
            undo: VecDeque::new(),
            redo: Vec::new(),
        }
    }

    /// The content as of the last record/undo/redo.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Registers a new edit.
    ///
    /// No-op when `new_content` equals the current value. Otherwise the
    /// old current is pushed onto the undo stack (evicting the oldest
    /// entry past [`UNDO_CAPACITY`]) and the redo stack is discarded —
    /// new edits invalidate forward history.
    pub fn record_state(&mut self, new_content: impl Into<String>) {
        let new_content = new_content.into();
        if new_content == self.current {
            return;
        }
        self.undo.push_back(std::mem::replace(&mut self.current, new_content));
        if self.undo.len() > UNDO_CAPACITY {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Steps back one edit, returning the restored content, or `None`
    /// when the history is exhausted.
    pub fn undo(&mut self) -> Option<String> {
        let previous = self.undo.pop_back()?;
        let displaced = std::mem::replace(&mut self.current, previous);
        self.redo.push(displaced);
        Some(self.current.clone())
    }

    /// Steps forward one undone edit, returning the restored content, or
    /// `None` when nothing has been undone since the last record.
    pub fn redo(&mut self) -> Option<String> {
        let next = self.redo.pop()?;
        let displaced = std::mem::replace(&mut self.current, next);
        self.undo.push_back(displaced);
        Some(self.current.clone())
    }
}
