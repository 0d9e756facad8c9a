//! Linear undo/redo history over full-document snapshots.

use crate::document::Document;

/// Maximum number of history entries to keep.
pub const MAX_HISTORY: usize = 50;

/// A bounded, linear (non-branching) list of document snapshots with a cursor.
///
/// The cursor always names the entry that matches the live document.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Document>,
    cursor: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl History {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: Document) -> Self {
        Self::with_limit(initial, MAX_HISTORY)
    }

    /// Create a history with a custom bound. A bound of 0 is treated as 1.
    pub fn with_limit(initial: Document, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new snapshot, discarding any redo branch.
    pub fn push(&mut self, snapshot: Document) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);

        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;

        log::debug!("history push: {} entries, cursor {}", self.entries.len(), self.cursor);
    }

    /// Step back one entry. Returns a copy of the snapshot to restore.
    pub fn undo(&mut self) -> Option<Document> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("history undo: cursor {}", self.cursor);
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry. Returns a copy of the snapshot to restore.
    pub fn redo(&mut self) -> Option<Document> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history redo: cursor {}", self.cursor);
        Some(self.entries[self.cursor].clone())
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drop every entry and start over from `snapshot`.
    pub fn reset(&mut self, snapshot: Document) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.cursor = 0;
    }

    /// The entry the cursor points at.
    pub fn current(&self) -> &Document {
        &self.entries[self.cursor]
    }

    /// Current cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    pub fn limit(&self) -> usize {
        self.limit
    }
}
