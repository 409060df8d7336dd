//! Bookmark renderer.
//!
//! Projects a list snapshot, the search text and the view mode into the HTML of
//! the bookmark container. The output depends on nothing else (the clock is
//! passed in, with the viewer's UTC offset), so rendering the same inputs
//! twice yields the same markup.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use reqwest::Url;
use serde::Serialize;

use crate::managers::bookmark_list::matches_term;
use crate::types::bookmark::Bookmark;
use crate::types::preferences::ViewMode;

/// DOM id of the bookmark container the drag binding is attached to.
pub const LIST_ELEMENT_ID: &str = "bookmarksList";

const EMPTY_LIST_TEXT: &str = "No bookmarks yet";
const NO_MATCH_TEXT: &str = "No matching bookmarks";

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub html: String,
    /// Ids of the cards in display order.
    pub visible_ids: Vec<i64>,
    /// True when the empty-state placeholder was rendered instead of cards.
    pub empty: bool,
    pub view_mode: ViewMode,
}

/// Renders the bookmark container.
pub fn render(
    bookmarks: &[Bookmark],
    filter: &str,
    view_mode: ViewMode,
    now: DateTime<FixedOffset>,
) -> RenderedView {
    let needle = filter.to_lowercase();
    let visible: Vec<&Bookmark> = bookmarks
        .iter()
        .filter(|b| matches_term(b, &needle))
        .collect();

    let mut html = format!(
        "<div id=\"{}\" class=\"{}\">",
        LIST_ELEMENT_ID,
        view_mode.container_class()
    );

    if visible.is_empty() {
        let text = if needle.trim().is_empty() {
            EMPTY_LIST_TEXT
        } else {
            NO_MATCH_TEXT
        };
        html.push_str(&format!(
            "<div id=\"emptyState\" class=\"empty-state show\"><i class=\"fas fa-bookmark\"></i><p>{}</p></div>",
            text
        ));
    } else {
        for bookmark in &visible {
            html.push_str(&render_card(bookmark, now));
        }
    }
    html.push_str("</div>");

    RenderedView {
        html,
        visible_ids: visible.iter().map(|b| b.id).collect(),
        empty: visible.is_empty(),
        view_mode,
    }
}

/// Markup for a single bookmark card.
pub fn render_card(bookmark: &Bookmark, now: DateTime<FixedOffset>) -> String {
    let pinned = bookmark.is_pinned;
    let mut card = String::with_capacity(1024);

    card.push_str(&format!(
        "<div class=\"bookmark-card{}\" data-id=\"{}\">",
        if pinned { " pinned" } else { "" },
        bookmark.id
    ));
    card.push_str(&format!(
        "<div class=\"bookmark-date\">{}</div>",
        escape_html(&relative_date(bookmark.created_at, now))
    ));
    if pinned {
        card.push_str("<div class=\"pin-indicator\"><i class=\"fas fa-thumbtack\"></i></div>");
    }
    card.push_str("<div class=\"bookmark-favicon\"><i class=\"fas fa-globe\"></i></div>");

    card.push_str("<div class=\"bookmark-content\">");
    card.push_str(&format!(
        "<div class=\"bookmark-title\">{}</div>",
        escape_html(&bookmark.title)
    ));
    card.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"bookmark-url\"><i class=\"fas fa-link\"></i> {}</a>",
        escape_html(&bookmark.url),
        escape_html(&domain_of(&bookmark.url))
    ));
    if let Some(note) = bookmark.note() {
        card.push_str(&format!(
            "<div class=\"bookmark-note\">{}</div>",
            escape_html(note)
        ));
    }
    card.push_str("</div>");

    let id = bookmark.id;
    card.push_str("<div class=\"bookmark-actions\">");
    card.push_str(&format!(
        "<button class=\"bookmark-btn pin{}\" data-action=\"toggle_pin\" data-id=\"{}\"><i class=\"fas fa-thumbtack\"></i> {}</button>",
        if pinned { " pinned" } else { "" },
        id,
        if pinned { "Unpin" } else { "Pin" }
    ));
    card.push_str(&format!(
        "<button class=\"bookmark-btn qr\" data-action=\"qr\" data-id=\"{}\"><i class=\"fas fa-qrcode\"></i> QR code</button>",
        id
    ));
    card.push_str(&format!(
        "<button class=\"bookmark-btn edit\" data-action=\"open_editor\" data-id=\"{}\"><i class=\"fas fa-edit\"></i> Edit</button>",
        id
    ));
    card.push_str(&format!(
        "<button class=\"bookmark-btn delete\" data-action=\"delete\" data-id=\"{}\"><i class=\"fas fa-trash\"></i> Delete</button>",
        id
    ));
    card.push_str("</div></div>");
    card
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Host part of `url` without a leading `www.`; the raw string when it does not parse.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_string()))
        .map(|host| host.trim_start_matches("www.").to_string())
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| url.to_string())
}

/// Calendar date of `at` in the time zone `now` carries.
pub fn local_date(at: DateTime<Utc>, now: DateTime<FixedOffset>) -> NaiveDate {
    at.with_timezone(now.offset()).date_naive()
}

/// Short creation date relative to `now`, counted in the viewer's days.
///
/// `today`, `yesterday`, `N days ago` within a week, otherwise `May 1`.
/// Timestamps in the future count as today.
pub fn relative_date(created_at: DateTime<Utc>, now: DateTime<FixedOffset>) -> String {
    let created = local_date(created_at, now);
    match (now.date_naive() - created).num_days() {
        d if d <= 0 => "today".to_string(),
        1 => "yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        _ => created.format("%b %-d").to_string(),
    }
}
