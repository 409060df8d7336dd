//! RPC method handler for the Pinmark line protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdin/stdout.
//! [`dispatch`] decodes the params for one method and starts the matching
//! [`App`] flow. Flows that need the network come back as
//! [`Reply::Pending`]; the caller runs the call and passes its completion to
//! [`resume`]. [`handle_method`] does both inline.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::app::{App, FlowOutcome};
use crate::flow::{ApiCall, Completion, Step};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::api::{ChangePasswordForm, DeleteAccountForm, LoginForm, RegisterForm};
use crate::types::bookmark::BookmarkDraft;
use crate::types::preferences::ViewMode;

/// Result of one dispatch step.
#[derive(Debug)]
pub enum Reply {
    /// The method finished with this result.
    Ready(Value),
    /// The method waits on a request; feed its completion to [`resume`].
    Pending(ApiCall),
}

fn parse<T: DeserializeOwned>(params: &Value) -> Result<T, String> {
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))
}

fn id_param(params: &Value) -> Result<i64, String> {
    params
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| "missing id".to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Result body of a finished flow. A few methods add state the host
/// usually wants next.
fn flow_result(app: &App, method: &str, outcome: FlowOutcome) -> Value {
    match method {
        "app.startup" => json!({"outcome": outcome, "page": app.page()}),
        "bookmarks.reload" => json!({"outcome": outcome, "count": app.bookmarks.len()}),
        "bookmarks.reorder" => json!({"outcome": outcome, "order": app.bookmarks.ids()}),
        _ => json!({"outcome": outcome}),
    }
}

fn reply_for(app: &App, method: &str, step: Step) -> Reply {
    match step {
        Step::Done(outcome) => Reply::Ready(flow_result(app, method, outcome)),
        Step::Await(call) => Reply::Pending(call),
    }
}

/// Continues `method` with the completion of its pending call.
pub fn resume(app: &mut App, method: &str, completion: Completion) -> Result<Reply, String> {
    let step = app.complete(completion).map_err(|e| e.to_string())?;
    Ok(reply_for(app, method, step))
}

/// Dispatches one method call and runs it to the end on the current task.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Flow handlers answer `{"outcome": ...}`; their visible effects have
/// already been emitted through the frontend by the time this returns.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    let mut reply = dispatch(app, method, params)?;
    loop {
        match reply {
            Reply::Ready(value) => return Ok(value),
            Reply::Pending(call) => {
                let completion = call.run().await;
                reply = resume(app, method, completion)?;
            }
        }
    }
}

/// Starts one method call.
pub fn dispatch(app: &mut App, method: &str, params: &Value) -> Result<Reply, String> {
    let step = match method {
        "app.startup" => app.begin_startup(),

        // ─── Auth / account ───
        "auth.login" => {
            let form: LoginForm = parse(params)?;
            app.begin_login(&form)
        }
        "auth.register" => {
            let form: RegisterForm = parse(params)?;
            app.begin_register(&form)
        }
        "account.change_password" => {
            let form: ChangePasswordForm = parse(params)?;
            app.begin_change_password(&form)
        }
        "account.delete" => {
            let form: DeleteAccountForm = parse(params)?;
            app.begin_delete_account(&form)
        }

        // ─── Bookmarks ───
        "bookmarks.reload" => app.begin_reload(),
        "bookmarks.add" => {
            let draft: BookmarkDraft = parse(params)?;
            app.begin_add_bookmark(&draft)
        }
        "bookmarks.edit" => {
            let id = id_param(params)?;
            let draft: BookmarkDraft = parse(params)?;
            app.begin_edit_bookmark(id, &draft)
        }
        "bookmarks.delete" => {
            let id = id_param(params)?;
            app.begin_delete_bookmark(id)
        }
        "bookmarks.toggle_pin" => {
            let id = id_param(params)?;
            app.begin_toggle_pin(id)
        }
        "bookmarks.reorder" => {
            let order: Vec<i64> = params
                .get("order")
                .cloned()
                .ok_or("missing order")
                .and_then(|v| serde_json::from_value(v).map_err(|_| "invalid order"))?;
            app.begin_reorder_drop(order)
        }

        _ => return handle_local(app, method, params).map(Reply::Ready),
    };
    let step = step.map_err(|e| e.to_string())?;
    Ok(reply_for(app, method, step))
}

/// Methods that never touch the network.
fn handle_local(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        "auth.logout" => {
            let outcome = app.logout().map_err(|e| e.to_string())?;
            Ok(json!({"outcome": outcome}))
        }
        "bookmarks.open_editor" => {
            let id = id_param(params)?;
            app.open_editor(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmarks.drag_start" => {
            app.drag_start().map_err(|e| e.to_string())?;
            Ok(json!({"state": app.reorder.state()}))
        }
        "bookmarks.search" => {
            let text = params.get("text").and_then(|v| v.as_str()).unwrap_or("");
            to_json(&app.search(text))
        }
        "bookmarks.qr" => {
            let id = id_param(params)?;
            let request = app.show_qr(id).map_err(|e| e.to_string())?;
            to_json(&request)
        }

        // ─── View ───
        "view.set_mode" => {
            let mode: ViewMode = params
                .get("mode")
                .cloned()
                .ok_or("missing mode")
                .and_then(|v| serde_json::from_value(v).map_err(|_| "invalid mode"))?;
            let view = app.set_view_mode(mode).map_err(|e| e.to_string())?;
            to_json(&view)
        }
        "view.toggle_theme" => {
            let theme = app.toggle_theme().map_err(|e| e.to_string())?;
            Ok(json!({"theme": theme}))
        }
        "viewport.resize" => {
            let width = params
                .get("width")
                .and_then(|v| v.as_u64())
                .and_then(|w| u32::try_from(w).ok())
                .ok_or("missing width")?;
            let view = app.resize(width);
            Ok(json!({"view": view, "drag_enabled": app.reorder.is_attached()}))
        }

        // ─── Session / settings ───
        "session.get" => Ok(json!({
            "authenticated": app.session.is_authenticated(),
            "user": app.session.user(),
        })),
        "settings.get" => to_json(app.settings_engine.get_settings()),
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            app.apply_settings();
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
