//! In-memory application state.
//!
//! `AppData` owns the four entity collections and exposes every mutation as a
//! method, so there is exactly one write surface and no ambient state. The
//! destructive operations (task/note/folder deletion) feed the single-slot
//! undo ledger; everything else mutates in place.

use chrono::NaiveDate;

use crate::history::{HistoryAction, HistoryItem};
use crate::model::{Folder, FolderUpdate, Note, NoteUpdate, SubTask, Task, TaskStatus};

/// Name of the folder that adopts tasks with a dangling `folder_id`.
pub const DEFAULT_FOLDER_NAME: &str = "MAIN_DATABASE";

/// Categories seeded into a fresh workspace.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Work", "Personal", "Health", "Learning", "Other"];

/// Due-date classification relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    Overdue,
    Today,
    Tomorrow,
    Upcoming,
}

/// The four entity collections plus the pending undo slot.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub folders: Vec<Folder>,
    pub categories: Vec<String>,
    pub notes: Vec<Note>,
    pub tasks: Vec<Task>,
    pub(crate) last_action: Option<HistoryItem>,
}

impl AppData {
    /// Empty state with the default category set.
    pub fn new() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    // --- lookups ---

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn find_folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn find_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    // --- folders ---

    /// Create a folder and insert it at the head of the folder list.
    pub fn create_folder(&mut self, name: impl Into<String>) -> &Folder {
        let folder = Folder::new(name);
        self.folders.insert(0, folder);
        &self.folders[0]
    }

    /// Apply a partial update; no-op for unknown ids.
    pub fn update_folder(&mut self, id: &str, update: FolderUpdate) -> bool {
        match self.folders.iter_mut().find(|f| f.id == id) {
            Some(folder) => {
                folder.apply(update);
                true
            }
            None => false,
        }
    }

    /// Delete a folder and everything referencing it, in one step.
    ///
    /// The full cascade (folder + matched tasks + matched notes) is recorded
    /// as the pending undo snapshot before anything is removed, so an undo
    /// restores the exact pre-delete contents.
    pub fn delete_folder(&mut self, id: &str) -> bool {
        let Some(pos) = self.folders.iter().position(|f| f.id == id) else {
            return false;
        };
        let folder = self.folders.remove(pos);

        let (cascade_tasks, kept_tasks): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks)
                .into_iter()
                .partition(|t| t.folder_id == id);
        let (cascade_notes, kept_notes): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.notes)
                .into_iter()
                .partition(|n| n.folder_id == id);
        self.tasks = kept_tasks;
        self.notes = kept_notes;

        self.record(HistoryAction::DeleteFolder {
            folder,
            tasks: cascade_tasks,
            notes: cascade_notes,
        });
        true
    }

    /// Ensure the orphan-adoption folder exists, returning its id.
    ///
    /// Created lazily at the head of the folder list the first time an
    /// unassigned task is encountered on load.
    pub fn ensure_default_folder(&mut self) -> String {
        if let Some(folder) = self.folders.iter().find(|f| f.name == DEFAULT_FOLDER_NAME) {
            return folder.id.clone();
        }
        let folder = Folder::new(DEFAULT_FOLDER_NAME);
        let id = folder.id.clone();
        self.folders.insert(0, folder);
        id
    }

    // --- tasks ---

    /// Insert a freshly built task at the head of the task list.
    pub fn add_task_front(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Flip completion state; returns the updated task.
    pub fn toggle_task(&mut self, id: &str) -> Option<&Task> {
        let task = self.find_task_mut(id)?;
        task.toggle();
        Some(&*task)
    }

    /// Move a task to a new workflow state; returns the updated task.
    pub fn set_task_status(&mut self, id: &str, status: TaskStatus) -> Option<&Task> {
        let task = self.find_task_mut(id)?;
        task.set_status(status);
        Some(&*task)
    }

    /// Replace a task wholesale (edit-modal save). No-op for unknown ids.
    ///
    /// `completed` is reconciled from `status` before storing so the two can
    /// never diverge through an edit.
    pub fn update_task(&mut self, mut task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                task.completed = task.status == TaskStatus::Done;
                *slot = task;
                true
            }
            None => false,
        }
    }

    pub fn update_task_notes(&mut self, id: &str, notes: impl Into<String>) -> bool {
        match self.find_task_mut(id) {
            Some(task) => {
                task.notes = notes.into();
                true
            }
            None => false,
        }
    }

    /// Replace a task's checklist with generated steps.
    pub fn set_sub_tasks(&mut self, id: &str, steps: Vec<SubTask>) -> Option<&Task> {
        let task = self.find_task_mut(id)?;
        task.sub_tasks = steps;
        Some(&*task)
    }

    pub fn add_sub_task(&mut self, task_id: &str, title: impl Into<String>) -> bool {
        match self.find_task_mut(task_id) {
            Some(task) => {
                task.sub_tasks.push(SubTask::new(title));
                true
            }
            None => false,
        }
    }

    pub fn toggle_sub_task(&mut self, task_id: &str, sub_task_id: &str) -> bool {
        let Some(task) = self.find_task_mut(task_id) else {
            return false;
        };
        match task.sub_tasks.iter_mut().find(|st| st.id == sub_task_id) {
            Some(sub) => {
                sub.completed = !sub.completed;
                true
            }
            None => false,
        }
    }

    /// Delete a task, recording it as the pending undo snapshot.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let task = self.tasks.remove(pos);
        self.record(HistoryAction::DeleteTask(task));
        true
    }

    /// Purge completed tasks in one folder.
    ///
    /// Bulk purges are not undoable; the pending undo entry (if any) is left
    /// untouched rather than replaced with a partial snapshot.
    pub fn clear_completed(&mut self, folder_id: &str) -> usize {
        let before = self.tasks.len();
        self.tasks
            .retain(|t| t.folder_id != folder_id || !t.completed);
        before - self.tasks.len()
    }

    // --- notes ---

    /// Insert a freshly built note at the head of the note list.
    pub fn add_note_front(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Apply a partial update, bumping `updated_at`. No-op for unknown ids.
    pub fn update_note(&mut self, id: &str, update: NoteUpdate) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.apply(update);
                true
            }
            None => false,
        }
    }

    /// Delete a note, recording it as the pending undo snapshot.
    pub fn delete_note(&mut self, id: &str) -> bool {
        let Some(pos) = self.notes.iter().position(|n| n.id == id) else {
            return false;
        };
        let note = self.notes.remove(pos);
        self.record(HistoryAction::DeleteNote(note));
        true
    }

    // --- categories ---

    /// Add a category if not already present.
    pub fn add_category(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        if self.categories.contains(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }

    pub fn remove_category(&mut self, category: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c != category);
        before != self.categories.len()
    }

    // --- undo ---

    /// Record a destructive operation, discarding any pending entry.
    fn record(&mut self, action: HistoryAction) {
        self.last_action = Some(HistoryItem::new(action));
    }

    /// Whether an undo is currently possible.
    pub fn can_undo(&self) -> bool {
        self.last_action.is_some()
    }

    /// Reverse the most recent destructive operation, if any.
    ///
    /// Restored entities are appended to their collections; original list
    /// positions are not preserved. The entry is consumed either way.
    pub fn undo(&mut self) -> bool {
        let Some(item) = self.last_action.take() else {
            return false;
        };
        match item.action {
            HistoryAction::DeleteTask(task) => self.tasks.push(task),
            HistoryAction::DeleteNote(note) => self.notes.push(note),
            HistoryAction::DeleteFolder {
                folder,
                tasks,
                notes,
            } => {
                self.folders.push(folder);
                self.tasks.extend(tasks);
                self.notes.extend(notes);
            }
        }
        true
    }

    // --- queries ---

    /// Tasks in a folder, sorted by priority weight (high first) then by
    /// creation time (newest first).
    pub fn tasks_in_folder(&self, folder_id: &str) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.folder_id == folder_id)
            .collect();
        tasks.sort_by(|a, b| {
            b.priority
                .weight()
                .cmp(&a.priority.weight())
                .then(b.created_at.cmp(&a.created_at))
        });
        tasks
    }

    /// Notes in a folder, most recently updated first.
    pub fn notes_in_folder(&self, folder_id: &str) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self
            .notes
            .iter()
            .filter(|n| n.folder_id == folder_id)
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }

    /// Whether a task's due date falls in the given window relative to
    /// `today`. Tasks without a due date match no window.
    pub fn due_matches(task: &Task, filter: DueFilter, today: NaiveDate) -> bool {
        let Some(due) = task.due_date.as_deref() else {
            return false;
        };
        // Plain dates parse directly; date-times are truncated to their day.
        let due_day = NaiveDate::parse_from_str(due, "%Y-%m-%d")
            .ok()
            .or_else(|| due.get(..10).and_then(|d| d.parse().ok()));
        let Some(due_day) = due_day else {
            return false;
        };
        let diff = (due_day - today).num_days();
        match filter {
            DueFilter::Overdue => diff < 0,
            DueFilter::Today => diff == 0,
            DueFilter::Tomorrow => diff == 1,
            DueFilter::Upcoming => diff > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_data_has_default_categories() {
        let data = AppData::new();
        assert_eq!(data.categories.len(), 5);
        assert!(data.categories.iter().any(|c| c == "Other"));
        assert!(data.folders.is_empty());
        assert!(data.tasks.is_empty());
        assert!(data.notes.is_empty());
        assert!(!data.can_undo());
    }

    #[test]
    fn ensure_default_folder_is_idempotent() {
        let mut data = AppData::new();
        let first = data.ensure_default_folder();
        let second = data.ensure_default_folder();
        assert_eq!(first, second);
        assert_eq!(data.folders.len(), 1);
        assert_eq!(data.folders[0].name, DEFAULT_FOLDER_NAME);
    }

    #[test]
    fn due_matches_handles_datetime_strings() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut task = Task::new("f", "t");

        task.due_date = Some("2025-06-02".to_string());
        assert!(AppData::due_matches(&task, DueFilter::Tomorrow, today));

        task.due_date = Some("2025-06-02T09:30:00Z".to_string());
        assert!(AppData::due_matches(&task, DueFilter::Tomorrow, today));

        task.due_date = Some("2025-05-20".to_string());
        assert!(AppData::due_matches(&task, DueFilter::Overdue, today));

        task.due_date = None;
        assert!(!AppData::due_matches(&task, DueFilter::Today, today));
    }
}
