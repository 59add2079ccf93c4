//! Core entity types: tasks, folders, and notes.
//!
//! All entities serialize with camelCase field names so that JSON blobs
//! written by earlier releases of the application load unchanged.

mod folder;
mod note;
mod task;

pub use folder::{Folder, FolderTheme, FolderUpdate};
pub use note::{Note, NoteUpdate};
pub use task::{Priority, SubTask, Task, TaskStatus};

/// Current wall-clock time as milliseconds since the Unix epoch.
///
/// Entity timestamps (`created_at`, `updated_at`) use this representation.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh entity identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
