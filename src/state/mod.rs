//! Renderer-independent client controller.
//!
//! Every user action is split into a synchronous `begin_*` step that updates
//! the state and hands back what the network call needs, and a `finish_*`
//! step that applies the result. The UI awaits the backend in between
//! without holding a borrow of the state.

pub mod chat;
pub mod upload;
pub mod view;

pub use chat::{ChatState, ContextLine};
pub use upload::{AUTO_CLOSE_DELAY, DialogPhase, UploadDialog, UploadDraft};
pub use view::{CategorySelector, LoginForm, StatusLine, View};

use crate::error::ApiResult;
use crate::session::{Session, SessionManager};
use crate::types::{
    Category, ChatMessage, ChatRequest, ChatResponse, DocumentUpload, LoginRequest, LoginResponse,
    UploadOutcome,
};

pub const SIGNING_IN: &str = "⏳ Signing in...";
pub const LOGIN_FAILED: &str = "Login failed";

/// A chat call ready to send.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingChat {
    pub token: Option<String>,
    pub request: ChatRequest,
}

/// An upload ready to send, tagged with the dialog it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingUpload {
    pub token: Option<String>,
    pub upload: DocumentUpload,
    pub generation: u64,
}

pub struct ClientState {
    session: SessionManager,
    view: View,
    role_label: String,
    pub login: LoginForm,
    pub selector: CategorySelector,
    pub chat: ChatState,
    pub upload: UploadDialog,
}

impl ClientState {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            view: View::Login,
            role_label: String::new(),
            login: LoginForm::default(),
            selector: CategorySelector::default(),
            chat: ChatState::default(),
            upload: UploadDialog::default(),
        }
    }

    pub fn session(&self) -> &Session {
        self.session.current()
    }

    /// Bearer for the startup health check, if a session was restored.
    pub fn health_token(&self) -> Option<String> {
        self.session.token().map(str::to_string)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn role_label(&self) -> &str {
        &self.role_label
    }

    pub fn flag_visible(&self) -> bool {
        self.session().grants(Category::Private)
    }

    /// Restore a persisted session and pick the starting view.
    pub fn boot(&mut self) {
        if self.session.restore().is_authenticated() {
            tracing::info!("restored session");
            self.adopt_session("Welcome back!");
            self.show_chat();
        } else {
            self.show_login();
        }
    }

    pub fn show_login(&mut self) {
        self.view = View::Login;
        self.login.reset();
    }

    pub fn show_chat(&mut self) {
        self.view = View::Chat;
    }

    fn adopt_session(&mut self, greeting: &str) {
        let session = self.session.current().clone();
        self.role_label = session.role_label();
        self.selector.configure(&session);
        self.chat.push(ChatMessage::assistant(format!(
            "{greeting} Categories: {}",
            self.role_label
        )));
    }

    // ============================================
    // Authentication
    // ============================================

    /// `None` while a login is already in flight.
    pub fn begin_login(&mut self) -> Option<LoginRequest> {
        if self.login.pending {
            return None;
        }
        self.login.pending = true;
        self.login.status = StatusLine::neutral(SIGNING_IN);
        Some(LoginRequest {
            username: self.login.username.trim().to_string(),
            password: self.login.password.clone(),
        })
    }

    pub fn finish_login(&mut self, result: ApiResult<LoginResponse>) {
        match result {
            Ok(response) => {
                tracing::info!("signed in with categories {:?}", response.categories);
                self.session
                    .save(Some(Session::new(response.token, response.categories)));
                self.adopt_session("Welcome!");
                self.show_chat();
            }
            Err(err) => {
                tracing::warn!("login failed: {}", err);
                let message = err.to_string();
                let message = if message.is_empty() {
                    LOGIN_FAILED.to_string()
                } else {
                    message
                };
                self.login.status = StatusLine::error(message);
            }
        }
        self.login.pending = false;
    }

    pub fn logout(&mut self) {
        tracing::info!("signed out");
        self.session.save(None);
        self.role_label.clear();
        self.chat.clear();
        self.upload.close();
        self.show_login();
    }

    // ============================================
    // Chat
    // ============================================

    /// `None` (and no transcript change) for a blank prompt.
    pub fn begin_send(&mut self) -> Option<PendingChat> {
        let message = self.chat.take_prompt()?;
        Some(PendingChat {
            token: self.session.token().map(str::to_string),
            request: ChatRequest {
                category: self.selector.selected(),
                message,
                top_k: chat::TOP_K,
            },
        })
    }

    pub fn finish_send(&mut self, result: ApiResult<ChatResponse>) {
        self.chat.apply_response(result);
    }

    // ============================================
    // Document flagging
    // ============================================

    pub fn open_flag_dialog(&mut self) {
        if self.flag_visible() {
            self.upload.open();
        }
    }

    pub fn cancel_flag_dialog(&mut self) {
        self.upload.close();
    }

    pub fn begin_upload(&mut self) -> Option<PendingUpload> {
        let upload = self.upload.begin_submit()?;
        Some(PendingUpload {
            token: self.session.token().map(str::to_string),
            upload,
            generation: self.upload.generation(),
        })
    }

    /// Returns the generation to pass to [`ClientState::auto_close_upload`]
    /// after [`AUTO_CLOSE_DELAY`] when the upload succeeded.
    pub fn finish_upload(
        &mut self,
        generation: u64,
        result: ApiResult<UploadOutcome>,
    ) -> Option<u64> {
        self.upload.finish_submit(generation, result)
    }

    pub fn auto_close_upload(&mut self, generation: u64) {
        self.upload.auto_close(generation);
    }
}
