//! Stats panel counters.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};

use crate::services::renderer::{domain_of, local_date};
use crate::types::bookmark::{Bookmark, BookmarkStats};

/// Computes the stats panel from the full (unfiltered) list.
///
/// `categories` counts distinct domains and `favorites` counts pinned
/// bookmarks. "Today" is the calendar date of `now` in its own offset, so a
/// bookmark counts as added today when it was created on the viewer's day.
pub fn compute(bookmarks: &[Bookmark], now: DateTime<FixedOffset>) -> BookmarkStats {
    let today = now.date_naive();
    let domains: HashSet<String> = bookmarks.iter().map(|b| domain_of(&b.url)).collect();

    BookmarkStats {
        total: bookmarks.len(),
        added_today: bookmarks
            .iter()
            .filter(|b| local_date(b.created_at, now) == today)
            .count(),
        categories: domains.len(),
        favorites: bookmarks.iter().filter(|b| b.is_pinned).count(),
    }
}
