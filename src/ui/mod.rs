//! Interfaces toward the host view.
//!
//! The core never touches a DOM. It emits [`UiEvent`]s and asks the host for
//! the few things only the host can do: answer a confirm prompt, bind or unbind
//! the drag-and-drop helper on the bookmark container, and draw a QR code.

use serde::Serialize;

use crate::services::renderer::RenderedView;
use crate::types::bookmark::{Bookmark, BookmarkStats};
use crate::types::preferences::{Theme, ViewMode};

/// Which top-level page is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Auth,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

/// Style of the inline message under the auth forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthTab {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    EditBookmark,
    ChangePassword,
    DeleteAccount,
    QrCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    AddBookmark,
}

/// What the QR collaborator is asked to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrRequest {
    pub text: String,
    pub title: String,
    pub size: u32,
    pub dark_color: String,
    pub light_color: String,
}

/// A visible side effect for the host to apply, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    ShowPage {
        page: Page,
        #[serde(skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    AuthMessage {
        message: String,
        kind: MessageKind,
    },
    ClearAuthMessage,
    SwitchAuthTab {
        tab: AuthTab,
    },
    Toast {
        message: String,
        kind: ToastKind,
    },
    Alert {
        message: String,
    },
    CloseModal {
        modal: Modal,
    },
    OpenEditor {
        bookmark: Bookmark,
    },
    ResetForm {
        form: Form,
    },
    Render {
        view: RenderedView,
    },
    Stats {
        stats: BookmarkStats,
    },
    ApplyTheme {
        theme: Theme,
    },
    ViewModeChanged {
        mode: ViewMode,
    },
}

/// Host-side collaborator.
pub trait Frontend {
    /// Applies one side effect.
    fn emit(&mut self, event: UiEvent);
    /// Blocking yes/no prompt. `false` cancels the flow that asked.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Binds the drag helper to the element with `list_id`.
    fn init_sortable(&mut self, list_id: &str);
    /// Unbinds the drag helper if one is bound.
    fn destroy_sortable(&mut self);
    fn render_qr(&mut self, request: &QrRequest);
}
