//! Load-time compatibility shims for persisted task blobs.
//!
//! Earlier releases stored tasks without a `status` field (completion was a
//! bare boolean) and allowed tasks with no folder assignment. Both shapes are
//! repaired here so the rest of the crate only ever sees current-format
//! tasks: `status` is backfilled from `completed`, and unassigned tasks are
//! adopted by a lazily created default folder.

use serde::Deserialize;

use crate::model::{Priority, SubTask, Task, TaskStatus};
use crate::store::AppData;

/// Deserialization helper accepting both current and legacy task shapes.
///
/// Every field that later releases added carries a default so that blobs from
/// any prior version deserialize cleanly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    pub priority: Priority,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    #[serde(default)]
    pub pomodoro_sessions: u32,
    #[serde(default)]
    pub time_spent: u64,
}

fn default_category() -> String {
    "Other".to_string()
}

impl TaskRecord {
    /// Convert to a current-format task.
    ///
    /// A missing `status` defaults from `completed`; a missing `folder_id`
    /// becomes an empty string and is repaired by [`repair_orphan_tasks`].
    pub(crate) fn into_task(self) -> Task {
        let status = self
            .status
            .unwrap_or(if self.completed {
                TaskStatus::Done
            } else {
                TaskStatus::Todo
            });
        Task {
            id: self.id,
            folder_id: self.folder_id.unwrap_or_default(),
            title: self.title,
            notes: self.notes,
            completed: self.completed,
            status,
            priority: self.priority,
            category: self.category,
            due_date: self.due_date,
            created_at: self.created_at,
            sub_tasks: self.sub_tasks,
            pomodoro_sessions: self.pomodoro_sessions,
            time_spent: self.time_spent,
        }
    }
}

/// Assign every task with a dangling or empty `folder_id` to the default
/// folder, creating that folder if needed. Returns how many tasks moved.
pub(crate) fn repair_orphan_tasks(data: &mut AppData) -> usize {
    let orphaned: Vec<usize> = data
        .tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            t.folder_id.is_empty() || !data.folders.iter().any(|f| f.id == t.folder_id)
        })
        .map(|(i, _)| i)
        .collect();

    if orphaned.is_empty() {
        return 0;
    }

    let default_id = data.ensure_default_folder();
    for index in &orphaned {
        data.tasks[*index].folder_id = default_id.clone();
    }
    orphaned.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_task_without_status_defaults_from_completed() {
        let json = r#"{
            "id": "t1",
            "folderId": "f1",
            "title": "Old format",
            "completed": true,
            "priority": "High",
            "category": "Work",
            "dueDate": null,
            "createdAt": 1700000000000
        }"#;
        let record: TaskRecord = serde_json::from_str(json).unwrap();
        let task = record.into_task();
        assert_eq!(task.status, TaskStatus::Done);
        assert!(task.completed);

        let json = json.replace("\"completed\": true", "\"completed\": false");
        let record: TaskRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.into_task().status, TaskStatus::Todo);
    }

    #[test]
    fn explicit_status_is_preserved() {
        let json = r#"{
            "id": "t2",
            "folderId": "f1",
            "title": "Current format",
            "completed": false,
            "status": "in_progress",
            "priority": "Medium",
            "category": "Other",
            "dueDate": null,
            "createdAt": 0
        }"#;
        let record: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.into_task().status, TaskStatus::InProgress);
    }

    #[test]
    fn orphan_tasks_are_adopted_by_default_folder() {
        let mut data = AppData::new();
        let folder_id = data.create_folder("Projects").id.clone();

        let mut owned = Task::new(&folder_id, "Owned");
        owned.folder_id = folder_id.clone();
        data.tasks.push(owned);

        let mut orphan = Task::new("", "Orphan");
        orphan.folder_id = String::new();
        data.tasks.push(orphan);

        let mut dangling = Task::new("gone", "Dangling");
        dangling.folder_id = "gone".to_string();
        data.tasks.push(dangling);

        let moved = repair_orphan_tasks(&mut data);
        assert_eq!(moved, 2);

        let default = data
            .folders
            .iter()
            .find(|f| f.name == crate::store::DEFAULT_FOLDER_NAME)
            .expect("default folder created");
        assert_eq!(data.tasks[1].folder_id, default.id);
        assert_eq!(data.tasks[2].folder_id, default.id);
        assert_eq!(data.tasks[0].folder_id, folder_id);
    }
}
