use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved URL record as returned by the server.
///
/// The server also sends `user_id`, `order` and `updated_at`; those are ignored.
/// Position is implied by the record's index in the list the server returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// The note, treating an empty string the same as no note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.is_empty())
    }
}

/// Fields submitted by the add and edit forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub note: String,
}

impl BookmarkDraft {
    /// Returns a copy with every field trimmed, as the forms submit them.
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            note: self.note.trim().to_string(),
        }
    }
}

/// Counters shown in the stats panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BookmarkStats {
    pub total: usize,
    pub added_today: usize,
    pub categories: usize,
    pub favorites: usize,
}
