//! Linear undo/redo history of transform snapshots.
//!
//! Every committed edit appends a full [`Transform`] snapshot. Undo and
//! redo move a cursor over the snapshots; recording after an undo drops
//! everything past the cursor. Entry 0 is always the transform the asset
//! had when it was selected.

use super::Transform;

/// A recorded snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryEntry {
    pub transform: Transform,
}

/// Undo/redo log for the selected asset.
#[derive(Clone, Debug)]
pub struct TransformHistory {
    entries: Vec<HistoryEntry>,
    /// Cursor into `entries`; always a valid index
    index: usize,
    /// Maximum number of entries, base included
    capacity: usize,
    /// Entry that matches what the store holds, if it is still in the log
    saved_index: Option<usize>,
}

impl Default for TransformHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformHistory {
    /// Default maximum history size.
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// History bounded to `capacity` entries (at least 2).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![HistoryEntry { transform: Transform::IDENTITY }],
            index: 0,
            capacity: capacity.max(2),
            saved_index: Some(0),
        }
    }

    /// Append `transform` after the cursor, discarding any redo entries.
    pub fn record(&mut self, transform: Transform) {
        self.entries.truncate(self.index + 1);
        if matches!(self.saved_index, Some(saved) if saved > self.index) {
            self.saved_index = None;
        }

        self.entries.push(HistoryEntry { transform });
        self.index = self.entries.len() - 1;

        // Evict the oldest edit, never the base
        while self.entries.len() > self.capacity {
            self.entries.remove(1);
            self.index -= 1;
            self.saved_index = match self.saved_index {
                Some(0) => Some(0),
                Some(1) => None,
                Some(saved) => Some(saved - 1),
                None => None,
            };
        }
    }

    /// Step back one entry.
    pub fn undo(&mut self) -> Option<Transform> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].transform)
    }

    /// Step forward one entry.
    pub fn redo(&mut self) -> Option<Transform> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].transform)
    }

    /// Drop everything and start over from `base`.
    pub fn reset(&mut self, base: Transform) {
        self.entries.clear();
        self.entries.push(HistoryEntry { transform: base });
        self.index = 0;
        self.saved_index = Some(0);
    }

    pub fn current(&self) -> Transform {
        self.entries[self.index].transform
    }

    pub fn base(&self) -> Transform {
        self.entries[0].transform
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the base entry is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Whether the current entry differs from the last saved one.
    pub fn is_dirty(&self) -> bool {
        self.saved_index != Some(self.index)
    }

    /// Mark the current entry as the one held by the store.
    pub fn mark_saved(&mut self) {
        self.saved_index = Some(self.index);
    }
}
