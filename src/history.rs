//! Single-slot undo ledger types.
//!
//! Each destructive operation records a snapshot sufficient to reverse it.
//! Only the most recent snapshot is retained: recording overwrites any
//! pending entry, and undo consumes the entry exactly once.

use crate::model::{Folder, Note, Task};

/// Snapshot of a destructive operation, tagged by what was deleted.
///
/// The folder variant carries the full cascade: the folder itself plus every
/// task and note that referenced it at deletion time.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    DeleteTask(Task),
    DeleteNote(Note),
    DeleteFolder {
        folder: Folder,
        tasks: Vec<Task>,
        notes: Vec<Note>,
    },
}

/// A pending undoable operation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub action: HistoryAction,
    /// Milliseconds since the Unix epoch, taken at deletion time
    pub timestamp: i64,
}

impl HistoryItem {
    pub fn new(action: HistoryAction) -> Self {
        Self {
            action,
            timestamp: crate::model::now_millis(),
        }
    }
}
