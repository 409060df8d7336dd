//! Flow plumbing between the [`App`](crate::app::App) and whoever drives it.
//!
//! A flow never awaits the network while it holds the app. Each step either
//! finishes with a [`FlowOutcome`] or hands back an [`ApiCall`] that owns
//! everything the request needs. The driver runs the call (inline, or on a
//! spawned task so further input keeps flowing) and feeds the [`Completion`]
//! to `App::complete`, which applies it and yields the next [`Step`].
//!
//! UI steps that follow a success after a fixed pause are not slept on
//! either: the app queues them as [`Scheduled`] entries and the driver fires
//! them through `App::run_deferred` when their delay is up.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;

use crate::types::api::{LoginResponse, MessageResponse};
use crate::types::bookmark::Bookmark;
use crate::types::errors::ApiError;

/// How a user flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOutcome {
    Completed,
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The user declined a confirm prompt; nothing was sent.
    Cancelled,
    /// The server or network refused; the message was shown.
    Failed,
    /// The token was rejected and the session has been discarded.
    LoggedOut,
    /// The session changed while the request was in flight; its result was dropped.
    Superseded,
}

/// What a flow needs next.
#[derive(Debug)]
pub enum Step {
    Done(FlowOutcome),
    Await(ApiCall),
}

type CallFuture = Pin<Box<dyn Future<Output = Completion> + Send>>;

/// One request to the bookmark API, detached from the app.
pub struct ApiCall {
    label: &'static str,
    future: CallFuture,
}

impl ApiCall {
    pub(crate) fn new<F>(label: &'static str, future: F) -> Self
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        Self {
            label,
            future: Box::pin(future),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Sends the request and waits for its classified response.
    pub async fn run(self) -> Completion {
        self.future.await
    }
}

impl fmt::Debug for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCall").field("label", &self.label).finish()
    }
}

/// A finished request, tagged with the token it was sent under.
#[derive(Debug)]
pub struct Completion {
    pub(crate) token: Option<String>,
    pub(crate) result: CallResult,
}

impl Completion {
    pub(crate) fn new(token: Option<String>, result: CallResult) -> Self {
        Self { token, result }
    }
}

/// Response payload per request kind.
#[derive(Debug)]
pub(crate) enum CallResult {
    Login(Result<LoginResponse, ApiError>),
    Register(Result<MessageResponse, ApiError>),
    ChangePassword(Result<MessageResponse, ApiError>),
    DeleteAccount(Result<MessageResponse, ApiError>),
    Reload {
        result: Result<Vec<Bookmark>, ApiError>,
        after: AfterReload,
    },
    Added(Result<Bookmark, ApiError>),
    Updated(Result<Bookmark, ApiError>),
    Deleted {
        id: i64,
        result: Result<(), ApiError>,
    },
    Pinned(Result<Bookmark, ApiError>),
    Reordered(Result<(), ApiError>),
}

/// What a reload finishes on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AfterReload {
    Nothing,
    /// The server accepted a reorder.
    ReorderSynced,
    /// The server refused a reorder; the flow reports `Failed` either way.
    ReorderRejected,
}

/// A UI step that runs some time after the flow that queued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Deferred {
    /// Registration went through: move to the login tab.
    SwitchToLogin,
    /// The old token is void after a password change: log out.
    EndSessionAfterPasswordChange,
    /// The account is gone: show the auth page.
    ShowAuthPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub action: Deferred,
}
