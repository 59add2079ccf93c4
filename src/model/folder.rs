use serde::{Deserialize, Serialize};

use super::{new_id, now_millis};

/// Accent color assigned to a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderTheme {
    #[default]
    Blue,
    Red,
    Amber,
    Green,
    Purple,
}

/// A top-level container scoping a set of tasks and notes.
///
/// Deleting a folder cascades to everything referencing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    #[serde(default)]
    pub theme: FolderTheme,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            created_at: now_millis(),
            theme: FolderTheme::Blue,
            is_favorite: false,
        }
    }
}

/// Partial folder update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct FolderUpdate {
    pub name: Option<String>,
    pub theme: Option<FolderTheme>,
    pub is_favorite: Option<bool>,
}

impl Folder {
    pub fn apply(&mut self, update: FolderUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(fav) = update.is_favorite {
            self.is_favorite = fav;
        }
    }
}
