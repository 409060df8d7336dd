//! Pinmark RPC Server — line protocol over stdin/stdout for a host view.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"auth.login", "params":{"username":"...","password":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"toast", ...} lines written as they happen.
//! Confirm:  {"event":"confirm","confirm_id":7,"prompt":"..."} answered by
//!           one {"confirm_id":7,"confirm":true|false} line.
//!
//! Requests that wait on the API run as spawned tasks, so later lines are
//! served while they are pending and responses may come back out of order.
//! Follow-ups queued by a flow fire from timers on the same loop. A confirm
//! prompt blocks the loop until its answer arrives; request lines sent in the
//! meantime are queued, never taken as the answer.
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::io::{self, BufRead, Write};
use std::sync::mpsc as std_mpsc;
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use pinmark::app::App;
use pinmark::flow::{Completion, Deferred};
use pinmark::rpc_handler::{dispatch, resume, Reply};
use pinmark::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use pinmark::ui::{Frontend, QrRequest, UiEvent};

const LOG_ENV: &str = "PINMARK_LOG";

/// Writes one JSON value as a protocol line.
fn write_line<T: Serialize>(value: &T) {
    let line = match serde_json::to_string(value) {
        Ok(line) => line,
        Err(e) => {
            error!(error = %e, "failed to encode protocol line");
            return;
        }
    };
    let mut out = io::stdout().lock();
    if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
        error!(error = %e, "failed to write to stdout");
    }
}

/// The host's answer to one confirm prompt.
#[derive(Debug, Deserialize)]
struct ConfirmAnswer {
    confirm_id: u64,
    confirm: bool,
}

/// Frontend that forwards everything to the host as event lines.
struct RpcFrontend {
    answers: std_mpsc::Receiver<ConfirmAnswer>,
    next_confirm_id: u64,
}

impl Frontend for RpcFrontend {
    fn emit(&mut self, event: UiEvent) {
        write_line(&event);
    }

    /// Blocks until the answer tagged with this prompt's id arrives. Answers
    /// to earlier prompts are skipped; closed stdin counts as "no".
    fn confirm(&mut self, prompt: &str) -> bool {
        self.next_confirm_id += 1;
        let confirm_id = self.next_confirm_id;
        write_line(&json!({"event": "confirm", "confirm_id": confirm_id, "prompt": prompt}));

        loop {
            match self.answers.recv() {
                Ok(answer) if answer.confirm_id == confirm_id => return answer.confirm,
                Ok(answer) => {
                    warn!(
                        expected = confirm_id,
                        got = answer.confirm_id,
                        "ignoring answer to another prompt"
                    );
                }
                Err(_) => {
                    warn!("stdin closed while waiting for a confirm answer");
                    return false;
                }
            }
        }
    }

    fn init_sortable(&mut self, list_id: &str) {
        write_line(&json!({"event": "init_sortable", "list_id": list_id}));
    }

    fn destroy_sortable(&mut self) {
        write_line(&json!({"event": "destroy_sortable"}));
    }

    fn render_qr(&mut self, request: &QrRequest) {
        write_line(&json!({"event": "render_qr", "qr": request}));
    }
}

/// Reads stdin on its own thread. Confirm answers go to the frontend, every
/// other line to the request queue, so neither can swallow the other.
fn spawn_stdin_reader(
    requests: mpsc::UnboundedSender<String>,
    answers: std_mpsc::Sender<ConfirmAnswer>,
) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!(error = %e, "failed to read stdin");
                    break;
                }
            };
            if let Ok(answer) = serde_json::from_str::<ConfirmAnswer>(&line) {
                if answers.send(answer).is_err() {
                    break;
                }
            } else if requests.send(line).is_err() {
                break;
            }
        }
        debug!("stdin reader finished");
    });
}

/// Work that finished off the main loop.
enum Finished {
    Call {
        id: Value,
        method: String,
        completion: Completion,
    },
    Timer(Deferred),
}

struct Server {
    app: App,
    done_tx: mpsc::UnboundedSender<Finished>,
    /// Spawned calls and timers not yet reported back.
    outstanding: usize,
}

impl Server {
    fn serve_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let req: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                write_line(&json!({"id": null, "error": format!("parse error: {}", e)}));
                return;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req
            .get("method")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let reply = dispatch(&mut self.app, &method, &params);
        self.answer(id, method, reply);
    }

    fn finish(&mut self, finished: Finished) {
        self.outstanding -= 1;
        match finished {
            Finished::Call {
                id,
                method,
                completion,
            } => {
                let reply = resume(&mut self.app, &method, completion);
                self.answer(id, method, reply);
            }
            Finished::Timer(action) => {
                if let Err(e) = self.app.run_deferred(action) {
                    error!(?action, error = %e, "deferred step failed");
                }
            }
        }
    }

    fn answer(&mut self, id: Value, method: String, reply: Result<Reply, String>) {
        match reply {
            Ok(Reply::Ready(val)) => write_line(&json!({"id": id, "result": val})),
            Ok(Reply::Pending(call)) => {
                debug!(method = %method, call = call.label(), "request in flight");
                self.outstanding += 1;
                let tx = self.done_tx.clone();
                tokio::spawn(async move {
                    let completion = call.run().await;
                    if tx
                        .send(Finished::Call {
                            id,
                            method,
                            completion,
                        })
                        .is_err()
                    {
                        debug!("server loop gone, dropping a response");
                    }
                });
            }
            Err(err) => {
                warn!(method = %method, error = %err, "request failed");
                write_line(&json!({"id": id, "error": err}));
            }
        }
    }

    /// Starts a timer for every follow-up the app queued.
    fn start_timers(&mut self) {
        for scheduled in self.app.take_scheduled() {
            self.outstanding += 1;
            let tx = self.done_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(scheduled.delay).await;
                if tx.send(Finished::Timer(scheduled.action)).is_err() {
                    debug!("server loop gone, dropping a follow-up");
                }
            });
        }
    }
}

/// Serves requests until stdin closes and everything in flight has finished.
async fn run(app: App, mut requests: mpsc::UnboundedReceiver<String>) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut server = Server {
        app,
        done_tx,
        outstanding: 0,
    };
    let mut input_open = true;

    while input_open || server.outstanding > 0 {
        tokio::select! {
            line = requests.recv(), if input_open => match line {
                Some(line) => server.serve_line(&line),
                None => input_open = false,
            },
            Some(finished) = done_rx.recv() => server.finish(finished),
        }
        server.start_timers();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut settings_engine = SettingsEngine::new(None);
    settings_engine.load()?;
    info!(
        config = settings_engine.get_config_path(),
        api = %settings_engine.get_settings().api.base_url,
        "settings loaded"
    );

    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (answer_tx, answer_rx) = std_mpsc::channel();
    let frontend = RpcFrontend {
        answers: answer_rx,
        next_confirm_id: 0,
    };
    let app = App::open(settings_engine, Box::new(frontend))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    write_line(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    spawn_stdin_reader(request_tx, answer_tx);
    runtime.block_on(run(app, request_rx));

    info!("stdin closed, exiting");
    Ok(())
}
