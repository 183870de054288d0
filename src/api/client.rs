use super::{Backend, CHAT_PATH, FLAG_PATH, HEALTH_PATH, LOGIN_PATH};
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    ChatRequest, ChatResponse, DocumentUpload, HealthStatus, LoginRequest, LoginResponse,
    UploadOutcome,
};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Options for [`HttpBackend::request`]. Defaults to an unauthenticated POST
/// without a body.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<String>,
    token: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::POST,
            headers: Vec::new(),
            body: None,
            token: None,
        }
    }
}

impl RequestOptions {
    pub fn post() -> Self {
        Self::default()
    }

    pub fn get() -> Self {
        Self::default().method(Method::GET)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>` when a token is present.
    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        let encoded = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(encoded);
        Ok(self.header("Content-Type", "application/json"))
    }
}

/// Pull a readable message out of a failed response body.
///
/// Prefers the JSON `detail` field, then the raw text, then `HTTP <status>`.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => body.to_string(),
            Some(other) => other.to_string(),
        },
        Err(_) => body.to_string(),
    };

    if message.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        message
    }
}

pub struct HttpBackend {
    client: reqwest::Client,
    base: String,
}

impl HttpBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(client: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Generic JSON call. Non-success statuses become [`ApiError::Status`]
    /// carrying the extracted message.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let RequestOptions {
            method,
            headers,
            body,
            token,
        } = options;

        let mut request = self.client.request(method.clone(), self.url(path));
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_error_message(status.as_u16(), &text);
            tracing::warn!("{} {} failed with {}", method, path, status);
            return Err(ApiError::status(status.as_u16(), message));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Backend for HttpBackend {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        self.request(LOGIN_PATH, RequestOptions::post().json(credentials)?)
            .await
    }

    async fn chat(&self, token: Option<&str>, request: &ChatRequest) -> ApiResult<ChatResponse> {
        let mut builder = self.client.post(self.url(CHAT_PATH)).json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!("chat returned {}", status);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn flag_document(
        &self,
        token: Option<&str>,
        upload: &DocumentUpload,
    ) -> ApiResult<UploadOutcome> {
        let file = Part::bytes(upload.file.bytes.clone()).file_name(upload.file.name.clone());
        let form = Form::new()
            .text("title", upload.title.clone())
            .text("description", upload.description.clone())
            .text("folder", upload.folder.clone())
            .part("file", file);

        // No explicit content type: the client sets the multipart boundary.
        let mut builder = self.client.post(self.url(FLAG_PATH)).multipart(form);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if status.is_success() {
            tracing::debug!("flag accepted: {}", text);
            Ok(UploadOutcome::Accepted)
        } else {
            Ok(UploadOutcome::Rejected {
                status: status.as_u16(),
                body: text,
            })
        }
    }

    async fn health(&self, token: Option<&str>) -> ApiResult<HealthStatus> {
        self.request(HEALTH_PATH, RequestOptions::get().bearer(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_wins() {
        assert_eq!(
            extract_error_message(401, r#"{"detail":"Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn structured_detail_is_serialized() {
        let message = extract_error_message(422, r#"{"detail":[{"loc":["body","password"]}]}"#);
        assert_eq!(message, r#"[{"loc":["body","password"]}]"#);
    }

    #[test]
    fn falls_back_to_raw_text_then_status() {
        assert_eq!(extract_error_message(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(
            extract_error_message(500, r#"{"error":"boom"}"#),
            r#"{"error":"boom"}"#
        );
        assert_eq!(extract_error_message(503, ""), "HTTP 503");
    }

    #[test]
    fn request_options_default_to_post() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::POST);
        assert!(options.token.is_none());
        assert_eq!(RequestOptions::get().method, Method::GET);
    }

    #[test]
    fn json_options_set_body_and_content_type() {
        let options = RequestOptions::post()
            .bearer(Some("tok"))
            .json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(options.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(options.token.as_deref(), Some("tok"));
        assert!(
            options
                .headers
                .iter()
                .any(|(k, v)| k == "Content-Type" && v == "application/json")
        );
    }

    #[test]
    fn base_address_is_normalized() {
        let api = HttpBackend::new("http://localhost:8000/");
        assert_eq!(api.base(), "http://localhost:8000");
        assert_eq!(api.url(CHAT_PATH), "http://localhost:8000/chat");
    }
}
