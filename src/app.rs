//! App Core for Pinmark.
//!
//! Central struct holding the session, the bookmark list, the reorder
//! controller and the host frontend. Every user flow starts with a
//! `begin_*` method that validates, asks for confirmation and returns a
//! [`Step`]. Network work is handed out as an [`ApiCall`] so the app is free
//! for other input while the request is pending; its [`Completion`] comes
//! back through [`App::complete`]. The async `login`, `reload`, ... methods
//! drive one flow inline.
//!
//! Every `ApiError` goes through [`App::route_api_error`]: a rejected token
//! forces a logout, anything else becomes a visible message and leaves state
//! alone.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::database::kv_store::DurableStore;
use crate::database::Database;
use crate::flow::{AfterReload, ApiCall, CallResult, Completion, Deferred, Scheduled, Step};
use crate::managers::bookmark_list::BookmarkList;
use crate::managers::reorder_controller::ReorderController;
use crate::managers::session_manager::{SessionManager, SessionManagerTrait};
use crate::platform;
use crate::services::api_client::ApiClient;
use crate::services::auth_flows;
use crate::services::preferences::{PreferencesStore, PreferencesStoreTrait};
use crate::services::renderer::{self, RenderedView, LIST_ELEMENT_ID};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::stats;
use crate::types::api::{ChangePasswordForm, DeleteAccountForm, LoginForm, RegisterForm};
use crate::types::bookmark::BookmarkDraft;
use crate::types::errors::{ApiError, AppError};
use crate::types::preferences::{Theme, ViewMode, ViewPreferences};
use crate::ui::{
    AuthTab, Form, Frontend, MessageKind, Modal, Page, QrRequest, ToastKind, UiEvent,
};

pub use crate::flow::FlowOutcome;

const LOGOUT_PROMPT: &str = "Are you sure you want to log out?";
const DELETE_ACCOUNT_PROMPT: &str =
    "Final confirmation: permanently delete your account? This cannot be undone.";
const DELETE_BOOKMARK_PROMPT: &str = "Delete this bookmark?";

/// Where a failure message is shown.
#[derive(Debug, Clone, Copy)]
enum Surface {
    AuthMessage,
    Toast,
    Alert,
}

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub api: ApiClient,
    pub session: SessionManager,
    pub bookmarks: BookmarkList,
    pub reorder: ReorderController,
    preferences_store: PreferencesStore,
    preferences: ViewPreferences,
    search_text: String,
    page: Page,
    viewport_width: u32,
    scheduled: Vec<Scheduled>,
    frontend: Box<dyn Frontend>,
}

impl App {
    /// Creates an App over an already-loaded settings engine and store.
    ///
    /// Nothing is read from the store until [`App::begin_startup`].
    pub fn new(
        settings_engine: SettingsEngine,
        store: Arc<dyn DurableStore>,
        frontend: Box<dyn Frontend>,
    ) -> Self {
        let settings = settings_engine.get_settings();
        let api = ApiClient::new(&settings.api.base_url);
        let viewport_width = settings.ui.initial_viewport_width;

        Self {
            api,
            session: SessionManager::new(store.clone()),
            bookmarks: BookmarkList::new(),
            reorder: ReorderController::new(),
            preferences_store: PreferencesStore::new(store),
            preferences: ViewPreferences::default(),
            search_text: String::new(),
            page: Page::Auth,
            viewport_width,
            scheduled: Vec::new(),
            frontend,
            settings_engine,
        }
    }

    /// Creates an App backed by the SQLite file named in the settings.
    ///
    /// A relative `storage.database_file` is resolved against the platform
    /// data directory, which is created if missing.
    pub fn open(
        settings_engine: SettingsEngine,
        frontend: Box<dyn Frontend>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db_path = Self::database_path(&settings_engine);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!(path = %db_path.display(), "opening storage");
        let db = Database::open(&db_path)?;
        Ok(Self::new(settings_engine, Arc::new(db), frontend))
    }

    fn database_path(settings_engine: &SettingsEngine) -> PathBuf {
        platform::get_data_dir().join(&settings_engine.get_settings().storage.database_file)
    }

    // --- Accessors ---

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn preferences(&self) -> ViewPreferences {
        self.preferences
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Rebuilds the HTTP client after `api.base_url` changed.
    pub fn apply_settings(&mut self) {
        let base_url = &self.settings_engine.get_settings().api.base_url;
        if base_url.trim_end_matches('/') != self.api.base_url() {
            info!(base_url = %base_url, "api base url changed");
            self.api = ApiClient::new(base_url);
        }
    }

    // --- Driving ---

    /// Runs a step to the end on the current task.
    pub async fn drive(&mut self, mut step: Step) -> Result<FlowOutcome, AppError> {
        loop {
            match step {
                Step::Done(outcome) => return Ok(outcome),
                Step::Await(call) => {
                    let completion = call.run().await;
                    step = self.complete(completion)?;
                }
            }
        }
    }

    /// Applies a finished request and returns what the flow needs next.
    ///
    /// A response sent under a token that is no longer the session's is
    /// dropped without touching state.
    pub fn complete(&mut self, completion: Completion) -> Result<Step, AppError> {
        let Completion { token, result } = completion;
        if token.is_some() && token.as_deref() != self.session.token() {
            debug!("dropping a response from an earlier session");
            return Ok(Step::Done(FlowOutcome::Superseded));
        }

        match result {
            CallResult::Login(Ok(response)) => {
                self.session.set(&response.token, &response.user)?;
                self.show_main_page();
                self.reload_step(AfterReload::Nothing)
            }
            CallResult::Login(Err(e)) => {
                self.route_api_error(e, "Login failed", Surface::AuthMessage)
            }

            CallResult::Register(Ok(_)) => {
                info!("registration accepted");
                self.auth_message(
                    "Registration successful, please log in".to_string(),
                    MessageKind::Success,
                );
                let delay = self.settings_engine.get_settings().timing.register_switch_delay_ms;
                self.schedule(delay, Deferred::SwitchToLogin);
                Ok(Step::Done(FlowOutcome::Completed))
            }
            CallResult::Register(Err(e)) => {
                self.route_api_error(e, "Registration failed", Surface::AuthMessage)
            }

            CallResult::ChangePassword(Ok(response)) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Password changed, please log in again".to_string());
                self.toast(message, ToastKind::Success);
                self.frontend.emit(UiEvent::CloseModal {
                    modal: Modal::ChangePassword,
                });
                let delay = self
                    .settings_engine
                    .get_settings()
                    .timing
                    .password_change_logout_delay_ms;
                self.schedule(delay, Deferred::EndSessionAfterPasswordChange);
                Ok(Step::Done(FlowOutcome::Completed))
            }
            CallResult::ChangePassword(Err(e)) => {
                self.route_api_error(e, "Failed to change password", Surface::Toast)
            }

            CallResult::DeleteAccount(Ok(response)) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Account deleted".to_string());
                self.toast(message, ToastKind::Success);
                self.end_session()?;
                self.frontend.emit(UiEvent::CloseModal {
                    modal: Modal::DeleteAccount,
                });
                let delay = self.settings_engine.get_settings().timing.account_delete_delay_ms;
                self.schedule(delay, Deferred::ShowAuthPage);
                Ok(Step::Done(FlowOutcome::Completed))
            }
            CallResult::DeleteAccount(Err(e)) => {
                self.route_api_error(e, "Failed to delete account", Surface::Toast)
            }

            CallResult::Reload {
                result: Ok(fresh),
                after,
            } => {
                debug!(count = fresh.len(), "bookmark list reloaded");
                self.bookmarks.replace_all(fresh);
                self.render();
                let outcome = match after {
                    AfterReload::Nothing => FlowOutcome::Completed,
                    AfterReload::ReorderSynced => {
                        self.reorder.settle();
                        FlowOutcome::Completed
                    }
                    AfterReload::ReorderRejected => {
                        self.reorder.settle();
                        FlowOutcome::Failed
                    }
                };
                Ok(Step::Done(outcome))
            }
            CallResult::Reload {
                result: Err(e),
                after,
            } => {
                if after != AfterReload::Nothing {
                    self.reorder.settle();
                }
                self.route_api_error(e, "Failed to load bookmarks", Surface::Toast)
            }

            CallResult::Added(Ok(created)) => {
                debug!(id = created.id, "bookmark created");
                self.frontend.emit(UiEvent::ResetForm {
                    form: Form::AddBookmark,
                });
                self.reload_step(AfterReload::Nothing)
            }
            CallResult::Added(Err(e)) => self.route_api_error(
                e,
                "Failed to add bookmark, please try again later",
                Surface::Alert,
            ),

            CallResult::Updated(Ok(_)) => {
                self.frontend.emit(UiEvent::CloseModal {
                    modal: Modal::EditBookmark,
                });
                self.reload_step(AfterReload::Nothing)
            }
            CallResult::Updated(Err(e)) => self.route_api_error(
                e,
                "Failed to update bookmark, please try again later",
                Surface::Alert,
            ),

            CallResult::Deleted { id, result: Ok(()) } => {
                self.bookmarks.remove(id);
                self.render();
                self.reload_step(AfterReload::Nothing)
            }
            CallResult::Deleted { result: Err(e), .. } => self.route_api_error(
                e,
                "Failed to delete bookmark, please try again later",
                Surface::Alert,
            ),

            CallResult::Pinned(Ok(updated)) => {
                debug!(id = updated.id, pinned = updated.is_pinned, "pin toggled");
                self.bookmarks.apply_pin_patch(updated);
                self.render();
                self.reload_step(AfterReload::Nothing)
            }
            CallResult::Pinned(Err(e)) => self.route_api_error(
                e,
                "Failed to pin bookmark, please try again later",
                Surface::Alert,
            ),

            CallResult::Reordered(Ok(())) => self.reload_step(AfterReload::ReorderSynced),
            CallResult::Reordered(Err(ApiError::Unauthenticated)) => {
                self.reorder.settle();
                self.route_api_error(ApiError::Unauthenticated, "", Surface::Toast)
            }
            CallResult::Reordered(Err(e)) => {
                warn!(error = %e, "reorder rejected, restoring server order");
                self.reorder.sync_failed();
                self.toast(e.user_message("Failed to save the new order"), ToastKind::Error);
                self.reload_step(AfterReload::ReorderRejected)
            }
        }
    }

    /// Hands over the follow-ups queued since the last call.
    pub fn take_scheduled(&mut self) -> Vec<Scheduled> {
        std::mem::take(&mut self.scheduled)
    }

    /// Runs a follow-up whose delay has elapsed.
    pub fn run_deferred(&mut self, action: Deferred) -> Result<(), AppError> {
        debug!(?action, "running deferred step");
        match action {
            Deferred::SwitchToLogin => {
                self.frontend.emit(UiEvent::SwitchAuthTab {
                    tab: AuthTab::Login,
                });
                self.frontend.emit(UiEvent::ClearAuthMessage);
            }
            Deferred::EndSessionAfterPasswordChange => {
                self.end_session()?;
                self.show_auth_page();
                self.toast(
                    "Please log in with your new password".to_string(),
                    ToastKind::Info,
                );
            }
            Deferred::ShowAuthPage => self.show_auth_page(),
        }
        Ok(())
    }

    // --- Startup ---

    /// Applies stored view preferences, restores the session and shows the
    /// matching page. A restored session continues with a reload.
    pub fn begin_startup(&mut self) -> Result<Step, AppError> {
        self.preferences = self.preferences_store.load()?;
        self.frontend.emit(UiEvent::ApplyTheme {
            theme: self.preferences.theme,
        });

        if self.session.load()?.is_authenticated() {
            self.show_main_page();
            self.reload_step(AfterReload::Nothing)
        } else {
            self.show_auth_page();
            Ok(Step::Done(FlowOutcome::Completed))
        }
    }

    pub async fn startup(&mut self) -> Result<FlowOutcome, AppError> {
        let step = self.begin_startup()?;
        self.drive(step).await
    }

    // --- Auth / account flows ---

    pub fn begin_login(&mut self, form: &LoginForm) -> Result<Step, AppError> {
        if let Err(e) = auth_flows::validate_login(form) {
            self.auth_message(e.to_string(), MessageKind::Error);
            return Ok(Step::Done(FlowOutcome::Invalid));
        }

        let api = self.api.clone();
        let username = form.username.clone();
        let password = Zeroizing::new(form.password.clone());
        Ok(Self::anonymous_call("login", async move {
            CallResult::Login(api.login(&username, &password).await)
        }))
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<FlowOutcome, AppError> {
        let step = self.begin_login(form)?;
        self.drive(step).await
    }

    /// Registers an account. Never authenticates; the switch to the login
    /// tab is queued behind the configured delay.
    pub fn begin_register(&mut self, form: &RegisterForm) -> Result<Step, AppError> {
        if let Err(e) = auth_flows::validate_registration(form) {
            self.auth_message(e.to_string(), MessageKind::Error);
            return Ok(Step::Done(FlowOutcome::Invalid));
        }

        let api = self.api.clone();
        let username = form.username.clone();
        let password = Zeroizing::new(form.password.clone());
        let code = form.verification_code.trim().to_string();
        Ok(Self::anonymous_call("register", async move {
            CallResult::Register(api.register(&username, &password, &code).await)
        }))
    }

    pub async fn register(&mut self, form: &RegisterForm) -> Result<FlowOutcome, AppError> {
        let step = self.begin_register(form)?;
        self.drive(step).await
    }

    /// Asks for confirmation, then drops the session and returns to the auth page.
    pub fn logout(&mut self) -> Result<FlowOutcome, AppError> {
        if !self.frontend.confirm(LOGOUT_PROMPT) {
            return Ok(FlowOutcome::Cancelled);
        }
        self.end_session()?;
        self.show_auth_page();
        Ok(FlowOutcome::Completed)
    }

    pub fn begin_change_password(
        &mut self,
        form: &ChangePasswordForm,
    ) -> Result<Step, AppError> {
        self.require_token()?;
        if let Err(e) = auth_flows::validate_password_change(form) {
            self.toast(e.to_string(), ToastKind::Error);
            return Ok(Step::Done(FlowOutcome::Invalid));
        }

        let old_password = Zeroizing::new(form.old_password.clone());
        let new_password = Zeroizing::new(form.new_password.clone());
        self.authed_call("change_password", move |api, token| async move {
            CallResult::ChangePassword(
                api.change_password(&token, &old_password, &new_password)
                    .await,
            )
        })
    }

    pub async fn change_password(
        &mut self,
        form: &ChangePasswordForm,
    ) -> Result<FlowOutcome, AppError> {
        let step = self.begin_change_password(form)?;
        self.drive(step).await
    }

    /// Deletes the account after the checkbox and a final confirm prompt.
    pub fn begin_delete_account(&mut self, form: &DeleteAccountForm) -> Result<Step, AppError> {
        self.require_token()?;
        if let Err(e) = auth_flows::validate_account_deletion(form) {
            self.toast(e.to_string(), ToastKind::Error);
            return Ok(Step::Done(FlowOutcome::Invalid));
        }
        if !self.frontend.confirm(DELETE_ACCOUNT_PROMPT) {
            return Ok(Step::Done(FlowOutcome::Cancelled));
        }

        let password = Zeroizing::new(form.password.clone());
        self.authed_call("delete_account", move |api, token| async move {
            CallResult::DeleteAccount(api.delete_account(&token, &password).await)
        })
    }

    pub async fn delete_account(
        &mut self,
        form: &DeleteAccountForm,
    ) -> Result<FlowOutcome, AppError> {
        let step = self.begin_delete_account(form)?;
        self.drive(step).await
    }

    // --- Bookmark flows ---

    /// Replaces the list from the server and renders it.
    pub fn begin_reload(&mut self) -> Result<Step, AppError> {
        self.reload_step(AfterReload::Nothing)
    }

    pub async fn reload(&mut self) -> Result<FlowOutcome, AppError> {
        let step = self.begin_reload()?;
        self.drive(step).await
    }

    /// Posts the trimmed draft. The add form is reset only on success.
    pub fn begin_add_bookmark(&mut self, draft: &BookmarkDraft) -> Result<Step, AppError> {
        let draft = draft.trimmed();
        self.authed_call("add_bookmark", move |api, token| async move {
            CallResult::Added(api.create_bookmark(&token, &draft).await)
        })
    }

    pub async fn add_bookmark(&mut self, draft: &BookmarkDraft) -> Result<FlowOutcome, AppError> {
        let step = self.begin_add_bookmark(draft)?;
        self.drive(step).await
    }

    /// Prefills the edit dialog from the current list.
    pub fn open_editor(&mut self, id: i64) -> Result<(), AppError> {
        let bookmark = self
            .bookmarks
            .get(id)
            .cloned()
            .ok_or(AppError::UnknownBookmark(id))?;
        self.frontend.emit(UiEvent::OpenEditor { bookmark });
        Ok(())
    }

    pub fn begin_edit_bookmark(
        &mut self,
        id: i64,
        draft: &BookmarkDraft,
    ) -> Result<Step, AppError> {
        let draft = draft.trimmed();
        self.authed_call("edit_bookmark", move |api, token| async move {
            CallResult::Updated(api.update_bookmark(&token, id, &draft).await)
        })
    }

    pub async fn edit_bookmark(
        &mut self,
        id: i64,
        draft: &BookmarkDraft,
    ) -> Result<FlowOutcome, AppError> {
        let step = self.begin_edit_bookmark(id, draft)?;
        self.drive(step).await
    }

    /// Confirms and deletes. On success the card goes at once, then the list
    /// is reloaded.
    pub fn begin_delete_bookmark(&mut self, id: i64) -> Result<Step, AppError> {
        self.require_token()?;
        if !self.frontend.confirm(DELETE_BOOKMARK_PROMPT) {
            return Ok(Step::Done(FlowOutcome::Cancelled));
        }
        self.authed_call("delete_bookmark", move |api, token| async move {
            CallResult::Deleted {
                id,
                result: api.delete_bookmark(&token, id).await,
            }
        })
    }

    pub async fn delete_bookmark(&mut self, id: i64) -> Result<FlowOutcome, AppError> {
        let step = self.begin_delete_bookmark(id)?;
        self.drive(step).await
    }

    /// Flips the pin flag. The returned record is patched in place, then the
    /// list is reloaded for the server's ordering.
    pub fn begin_toggle_pin(&mut self, id: i64) -> Result<Step, AppError> {
        self.authed_call("toggle_pin", move |api, token| async move {
            CallResult::Pinned(api.toggle_pin(&token, id).await)
        })
    }

    pub async fn toggle_pin(&mut self, id: i64) -> Result<FlowOutcome, AppError> {
        let step = self.begin_toggle_pin(id)?;
        self.drive(step).await
    }

    pub fn drag_start(&mut self) -> Result<(), AppError> {
        self.reorder.begin_drag()?;
        Ok(())
    }

    /// Posts the dropped order. Whatever the outcome, the list is reloaded and
    /// the dropped order is not kept. Further drops are refused until then.
    pub fn begin_reorder_drop(&mut self, order: Vec<i64>) -> Result<Step, AppError> {
        self.require_token()?;
        let order = self.reorder.drop_order(order)?;
        self.authed_call("reorder", move |api, token| async move {
            CallResult::Reordered(api.reorder(&token, &order).await)
        })
    }

    pub async fn reorder_drop(&mut self, order: Vec<i64>) -> Result<FlowOutcome, AppError> {
        let step = self.begin_reorder_drop(order)?;
        self.drive(step).await
    }

    /// Hands the bookmark's URL to the QR collaborator.
    pub fn show_qr(&mut self, id: i64) -> Result<QrRequest, AppError> {
        let bookmark = self.bookmarks.get(id).ok_or(AppError::UnknownBookmark(id))?;
        let ui = &self.settings_engine.get_settings().ui;
        let request = QrRequest {
            text: bookmark.url.clone(),
            title: bookmark.title.clone(),
            size: ui.qr_size_px,
            dark_color: ui.qr_dark_color.clone(),
            light_color: ui.qr_light_color.clone(),
        };
        self.frontend.render_qr(&request);
        Ok(request)
    }

    // --- View ---

    pub fn search(&mut self, text: &str) -> RenderedView {
        self.search_text = text.to_string();
        self.render()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<RenderedView, AppError> {
        self.preferences.view_mode = mode;
        self.preferences_store.set_view_mode(mode)?;
        self.frontend.emit(UiEvent::ViewModeChanged { mode });
        Ok(self.render())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, AppError> {
        let theme = self.preferences.theme.toggled();
        self.preferences.theme = theme;
        self.preferences_store.set_theme(theme)?;
        self.frontend.emit(UiEvent::ApplyTheme { theme });
        Ok(theme)
    }

    /// Records the new viewport width. While logged in the list is
    /// re-rendered so the drag binding follows the breakpoint.
    pub fn resize(&mut self, width: u32) -> Option<RenderedView> {
        self.viewport_width = width;
        if self.session.is_authenticated() {
            Some(self.render())
        } else {
            None
        }
    }

    /// Renders the current list, refreshes the stats panel and rebinds drag
    /// reordering for wide viewports. Dates are counted in local days.
    pub fn render(&mut self) -> RenderedView {
        let now = Local::now().fixed_offset();
        let view = renderer::render(
            self.bookmarks.items(),
            &self.search_text,
            self.preferences.view_mode,
            now,
        );
        self.frontend.emit(UiEvent::Render { view: view.clone() });

        self.frontend.destroy_sortable();
        self.reorder.detach();
        if self.viewport_width > self.settings_engine.get_settings().ui.mobile_breakpoint_px {
            self.frontend.init_sortable(LIST_ELEMENT_ID);
            self.reorder.attach();
        }

        self.frontend.emit(UiEvent::Stats {
            stats: stats::compute(self.bookmarks.items(), now),
        });
        view
    }

    // --- Internals ---

    fn require_token(&self) -> Result<String, AppError> {
        self.session
            .token()
            .map(str::to_string)
            .ok_or(AppError::NotLoggedIn)
    }

    fn anonymous_call<Fut>(label: &'static str, request: Fut) -> Step
    where
        Fut: Future<Output = CallResult> + Send + 'static,
    {
        Step::Await(ApiCall::new(label, async move {
            Completion::new(None, request.await)
        }))
    }

    /// Builds a call under the current token.
    fn authed_call<F, Fut>(&self, label: &'static str, request: F) -> Result<Step, AppError>
    where
        F: FnOnce(ApiClient, String) -> Fut,
        Fut: Future<Output = CallResult> + Send + 'static,
    {
        let token = self.require_token()?;
        let pending = request(self.api.clone(), token.clone());
        Ok(Step::Await(ApiCall::new(label, async move {
            Completion::new(Some(token), pending.await)
        })))
    }

    fn reload_step(&self, after: AfterReload) -> Result<Step, AppError> {
        self.authed_call("reload", move |api, token| async move {
            CallResult::Reload {
                result: api.list_bookmarks(&token).await,
                after,
            }
        })
    }

    fn schedule(&mut self, delay_ms: u64, action: Deferred) {
        debug!(?action, delay_ms, "follow-up scheduled");
        self.scheduled.push(Scheduled {
            delay: Duration::from_millis(delay_ms),
            action,
        });
    }

    /// The single place API failures are handled.
    fn route_api_error(
        &mut self,
        err: ApiError,
        fallback: &str,
        surface: Surface,
    ) -> Result<Step, AppError> {
        if err.is_unauthenticated() {
            warn!("token rejected by the server, logging out");
            self.end_session()?;
            self.show_auth_page();
            return Ok(Step::Done(FlowOutcome::LoggedOut));
        }

        warn!(error = %err, "request failed");
        let message = err.user_message(fallback);
        match surface {
            Surface::AuthMessage => self.auth_message(message, MessageKind::Error),
            Surface::Toast => self.toast(message, ToastKind::Error),
            Surface::Alert => self.frontend.emit(UiEvent::Alert { message }),
        }
        Ok(Step::Done(FlowOutcome::Failed))
    }

    /// Clears the session and every piece of per-user state.
    ///
    /// In-memory state is dropped before the storage result is checked.
    fn end_session(&mut self) -> Result<(), AppError> {
        let cleared = self.session.clear();
        self.bookmarks.clear();
        self.search_text.clear();
        self.reorder.detach();
        self.reorder.settle();
        self.frontend.destroy_sortable();
        cleared?;
        Ok(())
    }

    fn show_main_page(&mut self) {
        self.page = Page::Main;
        let username = self.session.user().map(|u| u.username.clone());
        self.frontend.emit(UiEvent::ShowPage {
            page: Page::Main,
            username,
        });
        self.frontend.emit(UiEvent::ViewModeChanged {
            mode: self.preferences.view_mode,
        });
    }

    fn show_auth_page(&mut self) {
        self.page = Page::Auth;
        self.frontend.emit(UiEvent::ShowPage {
            page: Page::Auth,
            username: None,
        });
    }

    fn auth_message(&mut self, message: String, kind: MessageKind) {
        self.frontend.emit(UiEvent::AuthMessage { message, kind });
    }

    fn toast(&mut self, message: String, kind: ToastKind) {
        self.frontend.emit(UiEvent::Toast { message, kind });
    }
}
