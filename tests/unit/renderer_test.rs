//! Unit tests for the bookmark renderer.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rstest::rstest;

use pinmark::services::renderer::{domain_of, escape_html, relative_date, render};
use pinmark::types::bookmark::Bookmark;
use pinmark::types::preferences::ViewMode;

fn now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2024, 5, 10, 15, 0, 0).unwrap().fixed_offset()
}

fn bm(id: i64, title: &str, url: &str) -> Bookmark {
    Bookmark {
        id,
        title: title.to_string(),
        url: url.to_string(),
        note: None,
        is_pinned: false,
        created_at: Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap(),
    }
}

#[rstest]
#[case("plain", "plain")]
#[case("<script>", "&lt;script&gt;")]
#[case("Tom & Jerry", "Tom &amp; Jerry")]
#[case("\"quoted\"", "&quot;quoted&quot;")]
#[case("it's", "it&#039;s")]
fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(escape_html(input), expected);
}

#[rstest]
#[case("https://www.rust-lang.org/learn", "rust-lang.org")]
#[case("http://docs.rs/serde", "docs.rs")]
#[case("https://sub.example.com:8443/x?y=1", "sub.example.com")]
#[case("not a url", "not a url")]
fn test_domain_of(#[case] url: &str, #[case] expected: &str) {
    assert_eq!(domain_of(url), expected);
}

#[rstest]
#[case(Utc.with_ymd_and_hms(2024, 5, 10, 0, 1, 0).unwrap(), "today")]
#[case(Utc.with_ymd_and_hms(2024, 5, 9, 23, 59, 0).unwrap(), "yesterday")]
#[case(Utc.with_ymd_and_hms(2024, 5, 7, 12, 0, 0).unwrap(), "3 days ago")]
#[case(Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap(), "6 days ago")]
#[case(Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap(), "May 3")]
#[case(Utc.with_ymd_and_hms(2023, 12, 25, 12, 0, 0).unwrap(), "Dec 25")]
fn test_relative_date(#[case] created: DateTime<Utc>, #[case] expected: &str) {
    assert_eq!(relative_date(created, now()), expected);
}

#[test]
fn test_cards_in_list_order_with_data_ids() {
    let list = vec![
        bm(3, "Three", "https://three.io"),
        bm(1, "One", "https://one.io"),
    ];
    let view = render(&list, "", ViewMode::Grid, now());

    assert_eq!(view.visible_ids, vec![3, 1]);
    assert!(!view.empty);
    let first = view.html.find("data-id=\"3\"").unwrap();
    let second = view.html.find("data-id=\"1\"").unwrap();
    assert!(first < second);
}

#[test]
fn test_user_text_is_escaped() {
    let mut b = bm(1, "<img src=x onerror=alert(1)>", "https://evil.io/?q=\"x\"");
    b.note = Some("a & b".to_string());
    let view = render(&[b], "", ViewMode::List, now());

    assert!(!view.html.contains("<img"));
    assert!(view.html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(view.html.contains("href=\"https://evil.io/?q=&quot;x&quot;\""));
    assert!(view.html.contains("<div class=\"bookmark-note\">a &amp; b</div>"));
}

#[test]
fn test_pinned_card_markup() {
    let mut pinned = bm(1, "Pinned", "https://p.io");
    pinned.is_pinned = true;
    let view = render(&[pinned], "", ViewMode::Grid, now());

    assert!(view.html.contains("class=\"bookmark-card pinned\""));
    assert!(view.html.contains("pin-indicator"));
    assert!(view.html.contains("Unpin"));

    let plain = render(&[bm(2, "Plain", "https://p.io")], "", ViewMode::Grid, now());
    assert!(!plain.html.contains("pin-indicator"));
    assert!(plain.html.contains("> Pin</button>"));
}

#[test]
fn test_empty_note_is_not_rendered() {
    let mut b = bm(1, "Title", "https://t.io");
    b.note = Some(String::new());
    let view = render(&[b], "", ViewMode::Grid, now());
    assert!(!view.html.contains("bookmark-note"));
}

#[test]
fn test_actions_present() {
    let view = render(&[bm(5, "Five", "https://five.io")], "", ViewMode::Grid, now());
    for action in ["toggle_pin", "qr", "open_editor", "delete"] {
        assert!(
            view.html.contains(&format!("data-action=\"{}\" data-id=\"5\"", action)),
            "missing action {}",
            action
        );
    }
}

#[rstest]
#[case(vec![], "", "No bookmarks yet")]
#[case(vec![], "rust", "No matching bookmarks")]
#[case(vec![bm(1, "Rust", "https://rust-lang.org")], "python", "No matching bookmarks")]
fn test_empty_state(#[case] list: Vec<Bookmark>, #[case] filter: &str, #[case] text: &str) {
    let view = render(&list, filter, ViewMode::Grid, now());
    assert!(view.empty);
    assert!(view.visible_ids.is_empty());
    assert!(view.html.contains("emptyState"));
    assert!(view.html.contains(text));
    assert!(!view.html.contains("bookmark-card"));
}

#[test]
fn test_filter_applies_to_cards() {
    let list = vec![
        bm(1, "Rust", "https://rust-lang.org"),
        bm(2, "Go", "https://go.dev"),
    ];
    let view = render(&list, "GO", ViewMode::List, now());
    assert_eq!(view.visible_ids, vec![2]);
    assert_eq!(view.view_mode, ViewMode::List);
}

#[test]
fn test_card_date_uses_viewer_day() {
    let mut b = bm(1, "Late", "https://late.io");
    b.created_at = Utc.with_ymd_and_hms(2024, 5, 9, 23, 30, 0).unwrap();
    let plus8 = FixedOffset::east_opt(8 * 3600).unwrap();
    let now = Utc
        .with_ymd_and_hms(2024, 5, 10, 1, 0, 0)
        .unwrap()
        .with_timezone(&plus8);

    let view = render(&[b], "", ViewMode::Grid, now);
    assert!(view.html.contains("<div class=\"bookmark-date\">today</div>"));
}
