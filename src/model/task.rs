use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{new_id, now_millis};

/// Task priority level.
///
/// Serialized capitalized ("Low", "Medium", "High") to match the stored
/// blob format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort weight: higher priorities order first.
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Lenient coercion for values coming back from the inference boundary.
    ///
    /// Accepts any casing ("HIGH", "high", "High"); anything unrecognized
    /// collapses to `Medium`.
    pub fn coerce(s: &str) -> Self {
        s.parse().unwrap_or(Priority::Medium)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: Low, Medium, High",
                s
            )),
        }
    }
}

/// Task workflow state.
///
/// `done` is redundant with `Task::completed`; the two are kept in sync by
/// the task mutators and must never diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: todo, in_progress, done",
                s
            )),
        }
    }
}

/// A single checklist step inside a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl SubTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            completed: false,
        }
    }
}

/// A task entry scoped to a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Owning folder (non-owning back-reference; repaired on load if dangling)
    pub folder_id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    /// Redundant with `status == Done`, kept for blob compatibility
    pub completed: bool,
    pub status: TaskStatus,
    pub priority: Priority,
    pub category: String,
    /// Calendar date (`YYYY-MM-DD`) or full ISO-8601 date-time
    pub due_date: Option<String>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    #[serde(default)]
    pub pomodoro_sessions: u32,
    /// Accumulated focus time in seconds
    #[serde(default)]
    pub time_spent: u64,
}

impl Task {
    /// Create a fresh task in the given folder. Starts as an open todo with
    /// empty checklist and zeroed counters.
    pub fn new(folder_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            folder_id: folder_id.into(),
            title: title.into(),
            notes: String::new(),
            completed: false,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            category: "Other".to_string(),
            due_date: None,
            created_at: now_millis(),
            sub_tasks: Vec::new(),
            pomodoro_sessions: 0,
            time_spent: 0,
        }
    }

    /// Flip completion, keeping `status` in sync.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.status = if self.completed {
            TaskStatus::Done
        } else {
            TaskStatus::Todo
        };
    }

    /// Move the task to a new workflow state, keeping `completed` in sync.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed = status == TaskStatus::Done;
    }
}
