//! Taskdeck Core Library
//!
//! Folder-scoped task and note tracking with a natural-language intake
//! pipeline and a single-slot undo ledger.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Facade Layer**: `AppHandler` - the operations a view layer calls
//! - **Domain Layer**: `store`/`model` modules - collections and entities
//! - **Persistence Layer**: `storage` module - four JSON blobs on disk
//!
//! Task intake prefers a schema-constrained inference call (Gemini) and
//! falls back to a deterministic rule-based parser on any failure, so intake
//! always succeeds once a folder is active.
//!
//! # Example
//!
//! ```no_run
//! use taskdeck::{AppHandler, Config, TaskOverrides};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = AppHandler::new("./data", Config::default())?;
//!     let folder = handler.create_folder("Inbox")?;
//!     let task = handler
//!         .create_task(
//!             "Buy milk tomorrow urgent",
//!             TaskOverrides::default(),
//!             Some(&folder.id),
//!         )
//!         .await?;
//!     println!("{:?}", task);
//!     Ok(())
//! }
//! ```

mod compat;
mod config;
mod history;
mod inference;
mod intake;
mod model;
mod parser;
mod storage;
mod store;

use anyhow::Result;
use std::path::Path;
use std::sync::{Arc, Mutex};

// Re-export commonly used types
pub use config::{Config, InferenceConfig};
pub use history::{HistoryAction, HistoryItem};
pub use inference::{GeminiClient, InferenceClient, mock};
pub use intake::TaskParser;
pub use model::{
    Folder, FolderTheme, FolderUpdate, Note, NoteUpdate, Priority, SubTask, Task, TaskStatus,
};
pub use parser::{ParsedTaskData, parse as parse_local, parse_with_reference};
pub use storage::Storage;
pub use store::{AppData, DEFAULT_CATEGORIES, DEFAULT_FOLDER_NAME, DueFilter};

/// Explicit field overrides supplied alongside a raw intake input.
///
/// Set fields win over whatever the parse produced.
#[derive(Debug, Clone, Default)]
pub struct TaskOverrides {
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub due_date: Option<String>,
}

/// Application facade over the shared collections.
///
/// Owns the in-memory state, the storage directory, and the intake parser.
/// Every mutation is applied under the lock and then persisted; no operation
/// here is fatal to the workspace.
pub struct AppHandler {
    pub(crate) data: Mutex<AppData>,
    pub(crate) storage: Storage,
    parser: TaskParser,
}

impl AppHandler {
    /// Open (or initialize) a workspace in `data_dir`.
    ///
    /// Builds a Gemini client when the config carries an `[inference]`
    /// section; otherwise intake runs on the local parser alone.
    pub fn new(data_dir: impl AsRef<Path>, config: Config) -> Result<Self> {
        let client: Option<Arc<dyn InferenceClient>> = match &config.inference {
            Some(inference) => Some(Arc::new(GeminiClient::new(inference)?)),
            None => None,
        };
        Self::with_client(data_dir, client)
    }

    /// Open a workspace with an injected inference client (or none).
    pub fn with_client(
        data_dir: impl AsRef<Path>,
        client: Option<Arc<dyn InferenceClient>>,
    ) -> Result<Self> {
        let storage = Storage::new(data_dir);
        let data = Mutex::new(storage.load()?);
        Ok(Self {
            data,
            storage,
            parser: TaskParser::new(client),
        })
    }

    fn save_data(&self) -> Result<()> {
        let data = self.data.lock().unwrap();
        self.storage.save(&data)?;
        Ok(())
    }

    // --- task intake ---

    /// Create a task from free text in the active folder.
    ///
    /// No-op returning `None` when no folder is active. The raw input goes
    /// through the intake parser (remote with local fallback); explicit
    /// overrides win over parsed fields. The new task lands at the head of
    /// the task list.
    pub async fn create_task(
        &self,
        raw_input: &str,
        overrides: TaskOverrides,
        active_folder_id: Option<&str>,
    ) -> Result<Option<Task>> {
        let Some(folder_id) = active_folder_id else {
            return Ok(None);
        };

        // Parse before taking the lock: the inference call may suspend, and
        // other mutations must stay possible meanwhile.
        let parsed = self.parser.parse(raw_input).await;

        let mut task = Task::new(folder_id, parsed.title);
        task.priority = overrides.priority.unwrap_or(parsed.priority);
        task.category = overrides.category.unwrap_or(parsed.category);
        task.due_date = overrides.due_date.or(parsed.due_date);
        task.notes = parsed.notes;

        let mut data = self.data.lock().unwrap();
        data.add_task_front(task.clone());
        drop(data);

        self.save_data()?;
        Ok(Some(task))
    }

    /// Generate sub-tasks for a task title and attach them.
    ///
    /// Returns the generated checklist, or `None` for an unknown task id.
    /// Uses the fixed generic steps when inference is unavailable.
    pub async fn breakdown_task(&self, task_id: &str) -> Result<Option<Vec<SubTask>>> {
        let title = {
            let data = self.data.lock().unwrap();
            match data.find_task(task_id) {
                Some(task) => task.title.clone(),
                None => return Ok(None),
            }
        };

        let steps = self.parser.breakdown(&title).await;
        let sub_tasks: Vec<SubTask> = steps.into_iter().map(SubTask::new).collect();

        let mut data = self.data.lock().unwrap();
        // The task may have been deleted while the call was in flight; the
        // result is simply dropped in that case.
        if data.set_sub_tasks(task_id, sub_tasks.clone()).is_none() {
            return Ok(None);
        }
        drop(data);

        self.save_data()?;
        Ok(Some(sub_tasks))
    }

    // --- task mutations ---

    /// Flip a task's completion state.
    pub fn toggle_task(&self, id: &str) -> Result<Option<Task>> {
        let mut data = self.data.lock().unwrap();
        let task = data.toggle_task(id).cloned();
        drop(data);

        if task.is_some() {
            self.save_data()?;
        }
        Ok(task)
    }

    /// Move a task to a new workflow state.
    pub fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<Option<Task>> {
        let mut data = self.data.lock().unwrap();
        let task = data.set_task_status(id, status).cloned();
        drop(data);

        if task.is_some() {
            self.save_data()?;
        }
        Ok(task)
    }

    /// Replace a task wholesale (edit-modal save).
    pub fn update_task(&self, task: Task) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let updated = data.update_task(task);
        drop(data);

        if updated {
            self.save_data()?;
        }
        Ok(updated)
    }

    pub fn update_task_notes(&self, id: &str, notes: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let updated = data.update_task_notes(id, notes);
        drop(data);

        if updated {
            self.save_data()?;
        }
        Ok(updated)
    }

    pub fn add_sub_task(&self, task_id: &str, title: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let added = data.add_sub_task(task_id, title);
        drop(data);

        if added {
            self.save_data()?;
        }
        Ok(added)
    }

    pub fn toggle_sub_task(&self, task_id: &str, sub_task_id: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let toggled = data.toggle_sub_task(task_id, sub_task_id);
        drop(data);

        if toggled {
            self.save_data()?;
        }
        Ok(toggled)
    }

    /// Delete a task, recording it for undo. No-op for unknown ids.
    pub fn delete_task(&self, id: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let deleted = data.delete_task(id);
        drop(data);

        if deleted {
            self.save_data()?;
        }
        Ok(deleted)
    }

    /// Permanently delete all completed tasks in a folder. Not undoable.
    pub fn clear_completed(&self, folder_id: &str) -> Result<usize> {
        let mut data = self.data.lock().unwrap();
        let purged = data.clear_completed(folder_id);
        drop(data);

        if purged > 0 {
            self.save_data()?;
        }
        Ok(purged)
    }

    // --- folder operations ---

    pub fn create_folder(&self, name: &str) -> Result<Folder> {
        let mut data = self.data.lock().unwrap();
        let folder = data.create_folder(name).clone();
        drop(data);

        self.save_data()?;
        Ok(folder)
    }

    pub fn update_folder(&self, id: &str, update: FolderUpdate) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let updated = data.update_folder(id, update);
        drop(data);

        if updated {
            self.save_data()?;
        }
        Ok(updated)
    }

    /// Delete a folder and cascade to its tasks and notes, recording the
    /// full cascade for undo. No-op for unknown ids.
    pub fn delete_folder(&self, id: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let deleted = data.delete_folder(id);
        drop(data);

        if deleted {
            self.save_data()?;
        }
        Ok(deleted)
    }

    // --- note operations ---

    /// Add a note to the active folder. No-op returning `None` when no
    /// folder is active.
    pub fn add_note(
        &self,
        title: &str,
        content: &str,
        active_folder_id: Option<&str>,
    ) -> Result<Option<Note>> {
        let Some(folder_id) = active_folder_id else {
            return Ok(None);
        };
        let note = Note::new(folder_id, title, content);

        let mut data = self.data.lock().unwrap();
        data.add_note_front(note.clone());
        drop(data);

        self.save_data()?;
        Ok(Some(note))
    }

    pub fn update_note(&self, id: &str, update: NoteUpdate) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let updated = data.update_note(id, update);
        drop(data);

        if updated {
            self.save_data()?;
        }
        Ok(updated)
    }

    /// Delete a note, recording it for undo. No-op for unknown ids.
    pub fn delete_note(&self, id: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let deleted = data.delete_note(id);
        drop(data);

        if deleted {
            self.save_data()?;
        }
        Ok(deleted)
    }

    // --- categories ---

    pub fn add_category(&self, category: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let added = data.add_category(category);
        drop(data);

        if added {
            self.save_data()?;
        }
        Ok(added)
    }

    pub fn remove_category(&self, category: &str) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let removed = data.remove_category(category);
        drop(data);

        if removed {
            self.save_data()?;
        }
        Ok(removed)
    }

    // --- undo ---

    /// Reverse the most recent destructive operation. No-op when nothing is
    /// pending; the pending entry is consumed either way.
    pub fn undo(&self) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        let restored = data.undo();
        drop(data);

        if restored {
            self.save_data()?;
        }
        Ok(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.data.lock().unwrap().can_undo()
    }

    // --- read access ---

    pub fn folders(&self) -> Vec<Folder> {
        self.data.lock().unwrap().folders.clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.data.lock().unwrap().categories.clone()
    }

    pub fn find_task(&self, id: &str) -> Option<Task> {
        self.data.lock().unwrap().find_task(id).cloned()
    }

    pub fn find_note(&self, id: &str) -> Option<Note> {
        self.data.lock().unwrap().find_note(id).cloned()
    }

    /// Tasks in a folder, priority-weighted then newest first.
    pub fn tasks_in_folder(&self, folder_id: &str) -> Vec<Task> {
        self.data
            .lock()
            .unwrap()
            .tasks_in_folder(folder_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Notes in a folder, most recently updated first.
    pub fn notes_in_folder(&self, folder_id: &str) -> Vec<Note> {
        self.data
            .lock()
            .unwrap()
            .notes_in_folder(folder_id)
            .into_iter()
            .cloned()
            .collect()
    }
}
