//! Unit tests for the RPC handler — methods dispatched by `handle_method`.
//!
//! These go through the same code path as the `pinmark-rpc` binary, with a
//! recording frontend and a mock API server.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{bookmark, list_json, logged_in_app, test_settings, Recorder};
use pinmark::app::App;
use pinmark::database::MemoryStore;
use pinmark::rpc_handler::{dispatch, handle_method, resume, Reply};
use pinmark::services::settings_engine::SettingsEngine;

// ─── Ping / unknown ───

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;
    let mut app = common::app(&server, &Recorder::new());
    let res = handle_method(&mut app, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let server = MockServer::start().await;
    let mut app = common::app(&server, &Recorder::new());
    let res = handle_method(&mut app, "nonexistent.method", &json!({})).await;
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Session / auth ───

#[tokio::test]
async fn test_login_then_session_get() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "user": {"id": 1, "username": "alice"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&[1])))
        .mount(&server)
        .await;

    let mut app = common::app(&server, &Recorder::new());
    let res = handle_method(
        &mut app,
        "auth.login",
        &json!({"username": "alice", "password": "secret1"}),
    )
    .await
    .unwrap();
    assert_eq!(res, json!({"outcome": "completed"}));

    let session = handle_method(&mut app, "session.get", &json!({}))
        .await
        .unwrap();
    assert_eq!(session["authenticated"], true);
    assert_eq!(session["user"]["username"], "alice");
}

#[tokio::test]
async fn test_login_with_malformed_params() {
    let server = MockServer::start().await;
    let mut app = common::app(&server, &Recorder::new());
    let res = handle_method(&mut app, "auth.login", &json!({"username": 5})).await;
    assert!(res.unwrap_err().starts_with("invalid params"));
}

#[tokio::test]
async fn test_bookmark_method_without_session_fails() {
    let server = MockServer::start().await;
    let mut app = common::app(&server, &Recorder::new());
    let res = handle_method(&mut app, "bookmarks.reload", &json!({})).await;
    assert_eq!(res.unwrap_err(), "Not logged in");
}

// ─── Bookmarks ───

#[tokio::test]
async fn test_reorder_requires_order() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server, &Recorder::new());
    let res = handle_method(&mut app, "bookmarks.reorder", &json!({})).await;
    assert_eq!(res.unwrap_err(), "missing order");

    let res = handle_method(&mut app, "bookmarks.reorder", &json!({"order": "3,1"})).await;
    assert_eq!(res.unwrap_err(), "invalid order");
}

#[tokio::test]
async fn test_reorder_returns_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookmarks/reorder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&[2, 1])))
        .mount(&server)
        .await;

    let mut app = logged_in_app(&server, &Recorder::new());
    app.bookmarks.replace_all(vec![bookmark(1, "a"), bookmark(2, "b")]);
    app.render();

    let res = handle_method(&mut app, "bookmarks.reorder", &json!({"order": [1, 2]}))
        .await
        .unwrap();
    assert_eq!(res, json!({"outcome": "completed", "order": [2, 1]}));
}

#[tokio::test]
async fn test_local_methods_answer_while_a_reload_is_pending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&[4, 5])))
        .mount(&server)
        .await;

    let mut app = logged_in_app(&server, &Recorder::new());
    let Reply::Pending(call) = dispatch(&mut app, "bookmarks.reload", &json!({})).unwrap() else {
        panic!("reload should be pending");
    };

    let Reply::Ready(pong) = dispatch(&mut app, "ping", &json!({})).unwrap() else {
        panic!("ping should answer at once");
    };
    assert_eq!(pong, json!({"pong": true}));

    let completion = call.run().await;
    let Reply::Ready(res) = resume(&mut app, "bookmarks.reload", completion).unwrap() else {
        panic!("reload should be finished");
    };
    assert_eq!(res, json!({"outcome": "completed", "count": 2}));
}

#[tokio::test]
async fn test_reload_after_logout_is_superseded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&[4])))
        .mount(&server)
        .await;

    let rec = Recorder::new();
    let mut app = logged_in_app(&server, &rec);
    let Reply::Pending(call) = dispatch(&mut app, "bookmarks.reload", &json!({})).unwrap() else {
        panic!("reload should be pending");
    };
    dispatch(&mut app, "auth.logout", &json!({})).unwrap();

    let completion = call.run().await;
    let Reply::Ready(res) = resume(&mut app, "bookmarks.reload", completion).unwrap() else {
        panic!("reload should be finished");
    };
    assert_eq!(res["outcome"], "superseded");
    assert!(app.bookmarks.is_empty());
}

#[tokio::test]
async fn test_search_and_qr() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server, &Recorder::new());
    app.bookmarks
        .replace_all(vec![bookmark(1, "Rust"), bookmark(2, "Go")]);

    let view = handle_method(&mut app, "bookmarks.search", &json!({"text": "go"}))
        .await
        .unwrap();
    assert_eq!(view["visible_ids"], json!([2]));

    let qr = handle_method(&mut app, "bookmarks.qr", &json!({"id": 2}))
        .await
        .unwrap();
    assert_eq!(qr["text"], "https://example.com/2");

    let missing = handle_method(&mut app, "bookmarks.qr", &json!({})).await;
    assert_eq!(missing.unwrap_err(), "missing id");
}

// ─── View ───

#[tokio::test]
async fn test_view_methods() {
    let server = MockServer::start().await;
    let mut app = logged_in_app(&server, &Recorder::new());

    let view = handle_method(&mut app, "view.set_mode", &json!({"mode": "list"}))
        .await
        .unwrap();
    assert_eq!(view["view_mode"], "list");

    let bad = handle_method(&mut app, "view.set_mode", &json!({"mode": "tiles"})).await;
    assert_eq!(bad.unwrap_err(), "invalid mode");

    let theme = handle_method(&mut app, "view.toggle_theme", &json!({}))
        .await
        .unwrap();
    assert_eq!(theme, json!({"theme": "dark"}));

    let resized = handle_method(&mut app, "viewport.resize", &json!({"width": 600}))
        .await
        .unwrap();
    assert_eq!(resized["drag_enabled"], false);
    let resized = handle_method(&mut app, "viewport.resize", &json!({"width": 1024}))
        .await
        .unwrap();
    assert_eq!(resized["drag_enabled"], true);
}

// ─── Settings ───

#[tokio::test]
async fn test_settings_set_rebuilds_client() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    let engine = SettingsEngine::with_settings(
        tmp.path().join("settings.json").to_string_lossy().to_string(),
        test_settings(&server),
    );
    let mut app = App::new(engine, Arc::new(MemoryStore::new()), Box::new(Recorder::new()));

    handle_method(
        &mut app,
        "settings.set",
        &json!({"key": "api.base_url", "value": "http://example.invalid/api/"}),
    )
    .await
    .unwrap();
    assert_eq!(app.api.base_url(), "http://example.invalid/api");

    let settings = handle_method(&mut app, "settings.get", &json!({}))
        .await
        .unwrap();
    assert_eq!(settings["api"]["base_url"], "http://example.invalid/api/");

    let bad = handle_method(&mut app, "settings.set", &json!({"key": "api.nope", "value": 1})).await;
    assert!(bad.is_err());
}
