//! Shared helpers for the integration tests: a recording frontend and an App
//! wired to a wiremock server.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::MockServer;

use pinmark::app::App;
use pinmark::database::kv_store::DurableStore;
use pinmark::database::MemoryStore;
use pinmark::managers::session_manager::SessionManagerTrait;
use pinmark::services::settings_engine::SettingsEngine;
use pinmark::types::bookmark::Bookmark;
use pinmark::types::session::User;
use pinmark::types::settings::ClientSettings;
use pinmark::ui::{Frontend, QrRequest, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortableCall {
    Init(String),
    Destroy,
}

/// Frontend that records every call. Clones share the same buffers.
#[derive(Clone)]
pub struct Recorder {
    pub events: Arc<Mutex<Vec<UiEvent>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub sortable: Arc<Mutex<Vec<SortableCall>>>,
    pub qr: Arc<Mutex<Vec<QrRequest>>>,
    pub confirm_answer: Arc<Mutex<bool>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            sortable: Arc::new(Mutex::new(Vec::new())),
            qr: Arc::new(Mutex::new(Vec::new())),
            confirm_answer: Arc::new(Mutex::new(true)),
        }
    }

    pub fn answer_confirms(&self, answer: bool) {
        *self.confirm_answer.lock().unwrap() = answer;
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn sortable_calls(&self) -> Vec<SortableCall> {
        self.sortable.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
        self.sortable.lock().unwrap().clear();
    }

    /// Visible id lists of every `Render` event, in order.
    pub fn rendered_ids(&self) -> Vec<Vec<i64>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Render { view } => Some(view.visible_ids),
                _ => None,
            })
            .collect()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Toast { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl Frontend for Recorder {
    fn emit(&mut self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        *self.confirm_answer.lock().unwrap()
    }

    fn init_sortable(&mut self, list_id: &str) {
        self.sortable
            .lock()
            .unwrap()
            .push(SortableCall::Init(list_id.to_string()));
    }

    fn destroy_sortable(&mut self) {
        self.sortable.lock().unwrap().push(SortableCall::Destroy);
    }

    fn render_qr(&mut self, request: &QrRequest) {
        self.qr.lock().unwrap().push(request.clone());
    }
}

pub fn test_settings(server: &MockServer) -> ClientSettings {
    let mut settings = ClientSettings::default();
    settings.api.base_url = format!("{}/api", server.uri());
    settings
}

/// App over a memory store, pointed at `server`.
pub fn app_with_store(
    server: &MockServer,
    store: Arc<dyn DurableStore>,
    recorder: &Recorder,
) -> App {
    let engine = SettingsEngine::with_settings(
        "unused-settings.json".to_string(),
        test_settings(server),
    );
    App::new(engine, store, Box::new(recorder.clone()))
}

pub fn app(server: &MockServer, recorder: &Recorder) -> App {
    app_with_store(server, Arc::new(MemoryStore::new()), recorder)
}

pub fn alice() -> User {
    User {
        id: 1,
        username: "alice".to_string(),
    }
}

/// App with alice logged in under token `abc`.
pub fn logged_in_app(server: &MockServer, recorder: &Recorder) -> App {
    let mut app = app(server, recorder);
    app.session.set("abc", &alice()).unwrap();
    app
}

/// Server-shaped bookmark JSON, including the fields the client ignores.
pub fn bookmark_json(id: i64, title: &str, pinned: bool) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "title": title,
        "url": format!("https://example.com/{}", id),
        "note": "",
        "order": id,
        "is_pinned": pinned,
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-01T12:00:00Z"
    })
}

pub fn bookmark(id: i64, title: &str) -> Bookmark {
    serde_json::from_value(bookmark_json(id, title, false)).unwrap()
}

pub fn list_json(ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| bookmark_json(*id, &format!("Bookmark {}", id), false))
            .collect(),
    )
}
