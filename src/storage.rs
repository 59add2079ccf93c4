//! File-backed persistence: four key-addressed JSON blobs.
//!
//! Each collection lives in its own file under the storage directory. Loading
//! is deliberately forgiving: a missing file yields the default collection
//! and a corrupt file resets that collection alone, so a damaged blob never
//! takes the rest of the workspace down with it.

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::compat::{self, TaskRecord};
use crate::model::{Folder, Note};
use crate::store::AppData;

const FOLDERS_FILE: &str = "folders.json";
const CATEGORIES_FILE: &str = "categories.json";
const NOTES_FILE: &str = "notes.json";
const TASKS_FILE: &str = "tasks.json";

pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load all four collections, applying the compatibility shims.
    ///
    /// Tasks pass through [`TaskRecord`] so legacy blobs without a `status`
    /// field load correctly, then orphaned tasks are adopted by the default
    /// folder.
    pub fn load(&self) -> Result<AppData> {
        let defaults = AppData::new();

        let mut data = AppData {
            folders: self.load_collection::<Folder>(FOLDERS_FILE, Vec::new()),
            categories: self.load_collection::<String>(CATEGORIES_FILE, defaults.categories),
            notes: self.load_collection::<Note>(NOTES_FILE, Vec::new()),
            tasks: self
                .load_collection::<TaskRecord>(TASKS_FILE, Vec::new())
                .into_iter()
                .map(TaskRecord::into_task)
                .collect(),
            last_action: None,
        };

        let repaired = compat::repair_orphan_tasks(&mut data);
        if repaired > 0 {
            warn!(count = repaired, "assigned orphaned tasks to default folder");
        }

        Ok(data)
    }

    /// Persist all four collections.
    pub fn save(&self, data: &AppData) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        self.save_collection(FOLDERS_FILE, &data.folders)?;
        self.save_collection(CATEGORIES_FILE, &data.categories)?;
        self.save_collection(NOTES_FILE, &data.notes)?;
        self.save_collection(TASKS_FILE, &data.tasks)?;
        Ok(())
    }

    /// Read one blob, falling back to `default` when the file is missing,
    /// unreadable, or not valid JSON for the expected shape.
    fn load_collection<T: DeserializeOwned>(&self, file: &str, default: Vec<T>) -> Vec<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            return default;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(file, error = %e, "failed to read blob, resetting collection");
                return default;
            }
        };
        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                warn!(file, error = %e, "malformed blob, resetting collection");
                default
            }
        }
    }

    fn save_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        fs::write(self.dir.join(file), content)?;
        Ok(())
    }
}
