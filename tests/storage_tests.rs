//! Persistence and blob-compatibility tests
use std::fs;
use taskdeck::{AppData, Note, Priority, Storage, Task, TaskStatus, DEFAULT_FOLDER_NAME};
use tempfile::TempDir;

#[test]
fn test_round_trip_preserves_all_collections() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path());

    let mut data = AppData::new();
    let folder_id = data.create_folder("Projects").id.clone();
    data.add_category("Finance");
    let mut task = Task::new(&folder_id, "File taxes");
    task.priority = Priority::High;
    task.due_date = Some("2025-04-15".to_string());
    task.set_status(TaskStatus::InProgress);
    data.add_task_front(task);
    data.add_note_front(Note::new(&folder_id, "Receipts", "scan the shoebox"));

    storage.save(&data).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded.folders, data.folders);
    assert_eq!(loaded.categories, data.categories);
    assert_eq!(loaded.tasks, data.tasks);
    assert_eq!(loaded.notes, data.notes);
}

#[test]
fn test_empty_directory_yields_fresh_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path());

    let data = storage.load().unwrap();
    assert!(data.folders.is_empty());
    assert!(data.tasks.is_empty());
    assert!(data.notes.is_empty());
    assert_eq!(data.categories.len(), 5);
    assert!(!data.can_undo());
}

#[test]
fn test_corrupt_blob_resets_only_that_collection() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path());

    let mut data = AppData::new();
    data.create_folder("Survives");
    storage.save(&data).unwrap();

    fs::write(temp_dir.path().join("tasks.json"), "{ not json").unwrap();

    let loaded = storage.load().unwrap();
    assert!(loaded.tasks.is_empty());
    assert_eq!(loaded.folders.len(), 1);
    assert_eq!(loaded.folders[0].name, "Survives");
}

#[test]
fn test_legacy_task_blob_backfills_status() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path());

    fs::write(
        temp_dir.path().join("folders.json"),
        r#"[{"id":"f1","name":"Old","createdAt":1700000000000}]"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("tasks.json"),
        r#"[
            {"id":"t1","folderId":"f1","title":"Finished long ago","completed":true,"priority":"Low"},
            {"id":"t2","folderId":"f1","title":"Still open","completed":false,"priority":"Medium"}
        ]"#,
    )
    .unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.tasks.len(), 2);

    let finished = loaded.find_task("t1").unwrap();
    assert_eq!(finished.status, TaskStatus::Done);
    assert!(finished.completed);
    assert_eq!(finished.category, "Other");

    let open = loaded.find_task("t2").unwrap();
    assert_eq!(open.status, TaskStatus::Todo);
    assert!(!open.completed);
}

#[test]
fn test_orphaned_tasks_adopted_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path());

    fs::write(temp_dir.path().join("folders.json"), "[]").unwrap();
    fs::write(
        temp_dir.path().join("tasks.json"),
        r#"[{"id":"t1","folderId":"gone","title":"Stranded","completed":false,"priority":"Medium"}]"#,
    )
    .unwrap();

    let loaded = storage.load().unwrap();
    let default = loaded
        .folders
        .iter()
        .find(|f| f.name == DEFAULT_FOLDER_NAME)
        .expect("default folder created on load");
    assert_eq!(loaded.tasks[0].folder_id, default.id);
}

#[test]
fn test_undo_slot_is_not_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path());

    let mut data = AppData::new();
    let folder_id = data.create_folder("Inbox").id.clone();
    let task = Task::new(&folder_id, "Ephemeral");
    let task_id = task.id.clone();
    data.add_task_front(task);
    data.delete_task(&task_id);
    assert!(data.can_undo());

    storage.save(&data).unwrap();
    let loaded = storage.load().unwrap();
    assert!(!loaded.can_undo());
}
