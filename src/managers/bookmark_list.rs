//! Bookmark List State.
//!
//! The in-memory, server-ordered list every render is projected from. The
//! server decides order (pinned first, then the user's saved order); this
//! module never sorts. Only three things mutate it:
//!
//! - [`BookmarkList::replace_all`] swaps in a fresh `GET /bookmarks` result,
//! - [`BookmarkList::apply_pin_patch`] swaps one record in place,
//! - [`BookmarkList::remove`] drops one record after a confirmed delete.
//!
//! Patches and removals are short-lived; the caller always follows them with a
//! reload, which is the only result trusted as authoritative.

use crate::types::bookmark::Bookmark;

/// Ordered bookmark collection for the current user.
#[derive(Debug, Clone, Default)]
pub struct BookmarkList {
    items: Vec<Bookmark>,
}

impl BookmarkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with the `GET /bookmarks` result, keeping its order.
    /// This is the reload; nothing else is trusted as authoritative.
    pub fn replace_all(&mut self, bookmarks: Vec<Bookmark>) {
        self.items = bookmarks;
    }

    /// Replaces the record with the same id, in place. Returns `false` when absent.
    pub fn apply_pin_patch(&mut self, updated: Bookmark) -> bool {
        match self.items.iter_mut().find(|b| b.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Removes the record with the given id. Returns `false` when absent.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|b| b.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bookmarks whose title, URL or note contains `term`, ignoring case.
    ///
    /// Borrowed view in list order; an empty term matches everything.
    pub fn filter(&self, term: &str) -> Vec<&Bookmark> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|b| matches_term(b, &needle))
            .collect()
    }

    pub fn get(&self, id: i64) -> Option<&Bookmark> {
        self.items.iter().find(|b| b.id == id)
    }

    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|b| b.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `needle` must already be lowercase.
pub fn matches_term(bookmark: &Bookmark, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    bookmark.title.to_lowercase().contains(needle)
        || bookmark.url.to_lowercase().contains(needle)
        || bookmark
            .note()
            .map(|n| n.to_lowercase().contains(needle))
            .unwrap_or(false)
}
