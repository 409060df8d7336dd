//! Unit tests for the HTTP client: headers, bodies and response classification.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pinmark::services::api_client::ApiClient;
use pinmark::types::bookmark::BookmarkDraft;
use pinmark::types::errors::{ApiError, NETWORK_ERROR_MESSAGE};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&format!("{}/api", server.uri()))
}

fn bookmark_body(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": 1,
        "title": "Rust",
        "url": "https://rust-lang.org",
        "note": null,
        "order": 0,
        "is_pinned": false,
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_authenticated_body_call_sends_bearer_and_json_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookmarks"))
        .and(header("Authorization", "Bearer abc"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"title": "Rust", "url": "https://rust-lang.org", "note": ""})))
        .respond_with(ResponseTemplate::new(201).set_body_json(bookmark_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let draft = BookmarkDraft {
        title: "Rust".to_string(),
        url: "https://rust-lang.org".to_string(),
        note: String::new(),
    };
    let created = client(&server).create_bookmark("abc", &draft).await.unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.note(), None);
}

#[tokio::test]
async fn test_login_sends_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "user": {"id": 1, "username": "alice"}
        })))
        .mount(&server)
        .await;

    let response = client(&server).login("alice", "secret1").await.unwrap();
    assert_eq!(response.token, "abc");
    assert_eq!(response.user.username, "alice");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_401_with_token_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "expired"})))
        .mount(&server)
        .await;

    let err = client(&server).list_bookmarks("abc").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthenticated);
    assert!(err.is_unauthenticated());
}

#[tokio::test]
async fn test_401_on_login_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).login("alice", "nope").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Application {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        }
    );
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[tokio::test]
async fn test_non_json_error_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/bookmarks/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .update_bookmark("abc", 3, &BookmarkDraft::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Application {
            status: 500,
            message: None,
        }
    );
    assert_eq!(err.user_message("Update failed"), "Update failed");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = ApiClient::new("http://127.0.0.1:1/api");
    let err = client.list_bookmarks("abc").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message("ignored"), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_success_with_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).list_bookmarks("abc").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_empty_success_body_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookmarks/5"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_bookmark("abc", 5).await.unwrap();
}

#[tokio::test]
async fn test_reorder_and_account_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookmarks/reorder"))
        .and(body_json(json!({"bookmark_ids": [3, 1, 2]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/account"))
        .and(body_json(json!({"password": "pw", "confirm": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "bye"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.reorder("abc", &[3, 1, 2]).await.unwrap();
    let response = api.delete_account("abc", "pw").await.unwrap();
    assert_eq!(response.message.as_deref(), Some("bye"));
}

#[tokio::test]
async fn test_pin_toggle_returns_updated_record() {
    let server = MockServer::start().await;
    let mut body = bookmark_body(42);
    body["is_pinned"] = json!(true);
    Mock::given(method("POST"))
        .and(path("/api/bookmarks/42/pin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let updated = client(&server).toggle_pin("abc", 42).await.unwrap();
    assert!(updated.is_pinned);
}
