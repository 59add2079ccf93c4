use serde::{Deserialize, Serialize};

use super::{new_id, now_millis};

/// A free-form note scoped to a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub folder_id: String,
    pub title: String,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Note {
    pub fn new(
        folder_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = now_millis();
        Self {
            id: new_id(),
            folder_id: folder_id.into(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
            is_favorite: false,
        }
    }
}

/// Partial note update; `None` fields are left untouched.
///
/// Applying an update always bumps `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
}

impl Note {
    pub fn apply(&mut self, update: NoteUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(fav) = update.is_favorite {
            self.is_favorite = fav;
        }
        self.updated_at = now_millis();
    }
}
