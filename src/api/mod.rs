/// Remote call gateway for the RBAC chat API.
///
/// # Architecture
///
/// - `Backend` - the calls the client makes, as a trait so flows can run
///   against an in-memory fake
/// - `client` - `HttpBackend`, the `reqwest` implementation
///
/// # Usage
///
/// ```rust,no_run
/// use rbac_chat::api::{Backend, HttpBackend};
/// use rbac_chat::types::LoginRequest;
///
/// # async fn example() -> rbac_chat::error::ApiResult<()> {
/// let api = HttpBackend::new("http://localhost:8000");
/// let login = api
///     .login(&LoginRequest { username: "alice".into(), password: "pw".into() })
///     .await?;
/// println!("granted: {:?}", login.categories);
/// # Ok(())
/// # }
/// ```
mod client;

pub use client::{HttpBackend, RequestOptions, extract_error_message};

use crate::error::ApiResult;
use crate::types::{
    ChatRequest, ChatResponse, DocumentUpload, HealthStatus, LoginRequest, LoginResponse,
    UploadOutcome,
};
use async_trait::async_trait;

pub const LOGIN_PATH: &str = "/auth/login";
pub const CHAT_PATH: &str = "/chat";
pub const FLAG_PATH: &str = "/documents/flag";
pub const HEALTH_PATH: &str = "/health";

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Backend {
    /// `POST /auth/login` through the generic helper.
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse>;

    /// `POST /chat`. The body is parsed whatever the status code.
    async fn chat(&self, token: Option<&str>, request: &ChatRequest) -> ApiResult<ChatResponse>;

    /// `POST /documents/flag` as multipart. A response that arrives with a
    /// failure status is `Ok(UploadOutcome::Rejected)`, not an error.
    async fn flag_document(
        &self,
        token: Option<&str>,
        upload: &DocumentUpload,
    ) -> ApiResult<UploadOutcome>;

    /// `GET /health`, authenticated when a session is already restored.
    async fn health(&self, token: Option<&str>) -> ApiResult<HealthStatus>;
}
