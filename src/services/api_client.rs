//! HTTP client for the bookmark API.
//!
//! Every call goes through [`ApiClient::send`], which attaches the bearer token
//! and JSON content type and classifies the response into success,
//! `Unauthenticated`, application failure or transport failure. Callers never
//! look at status codes themselves.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::api::{
    ChangePasswordRequest, DeleteAccountRequest, ErrorBody, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, ReorderRequest,
};
use crate::types::bookmark::{Bookmark, BookmarkDraft};
use crate::types::errors::ApiError;

/// Thin wrapper over `reqwest::Client` bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix; a trailing slash is dropped.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and classifies the response.
    ///
    /// A 2xx body is parsed as JSON (`Value::Null` when empty). A 401 counts as
    /// `Unauthenticated` only when `token` was attached; login and register
    /// carry no token, so their 401s surface as application errors with the
    /// server's message.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "request failed before a response arrived");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "response received");

        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            return Err(ApiError::Unauthenticated);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            if bytes.iter().all(|b| b.is_ascii_whitespace()) {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.error);
        Err(ApiError::Application {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_typed<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let value = self.send(method, path, token, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // --- Auth / account ---

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { username, password };
        self.send_typed(Method::POST, "/login", None, Some(&body)).await
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        verification_code: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = RegisterRequest {
            username,
            password,
            verification_code,
        };
        self.send_message(Method::POST, "/register", None, &body).await
    }

    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = ChangePasswordRequest {
            old_password,
            new_password,
        };
        self.send_message(Method::POST, "/user/change-password", Some(token), &body)
            .await
    }

    pub async fn delete_account(
        &self,
        token: &str,
        password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = DeleteAccountRequest {
            password,
            confirm: true,
        };
        self.send_message(Method::DELETE, "/user/account", Some(token), &body)
            .await
    }

    /// `{message}` endpoints tolerate an empty or non-object 2xx body.
    async fn send_message<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<MessageResponse, ApiError> {
        let value = self.send(method, path, token, Some(body)).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    // --- Bookmarks ---

    pub async fn list_bookmarks(&self, token: &str) -> Result<Vec<Bookmark>, ApiError> {
        self.send_typed::<_, ()>(Method::GET, "/bookmarks", Some(token), None)
            .await
    }

    pub async fn create_bookmark(
        &self,
        token: &str,
        draft: &BookmarkDraft,
    ) -> Result<Bookmark, ApiError> {
        self.send_typed(Method::POST, "/bookmarks", Some(token), Some(draft))
            .await
    }

    pub async fn update_bookmark(
        &self,
        token: &str,
        id: i64,
        draft: &BookmarkDraft,
    ) -> Result<Bookmark, ApiError> {
        let path = format!("/bookmarks/{}", id);
        self.send_typed(Method::PUT, &path, Some(token), Some(draft))
            .await
    }

    pub async fn delete_bookmark(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let path = format!("/bookmarks/{}", id);
        self.send::<()>(Method::DELETE, &path, Some(token), None)
            .await
            .map(|_| ())
    }

    /// Flips the pin flag server-side and returns the updated record.
    pub async fn toggle_pin(&self, token: &str, id: i64) -> Result<Bookmark, ApiError> {
        let path = format!("/bookmarks/{}/pin", id);
        self.send_typed::<_, ()>(Method::POST, &path, Some(token), None)
            .await
    }

    pub async fn reorder(&self, token: &str, bookmark_ids: &[i64]) -> Result<(), ApiError> {
        let body = ReorderRequest { bookmark_ids };
        self.send(Method::POST, "/bookmarks/reorder", Some(token), Some(&body))
            .await
            .map(|_| ())
    }
}
