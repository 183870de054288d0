use crate::error::ApiResult;
use crate::types::{ChatMessage, ChatResponse, ContextSnippet};

pub const TOP_K: u32 = 5;
pub const NO_ANSWER: &str = "(no answer)";
pub const REQUEST_FAILED: &str = "Request failed";
const EXCERPT_CHARS: usize = 240;

/// A context snippet ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextLine {
    pub source: String,
    pub excerpt: String,
}

impl From<&ContextSnippet> for ContextLine {
    fn from(snippet: &ContextSnippet) -> Self {
        Self {
            source: snippet.source.clone(),
            excerpt: excerpt(&snippet.text),
        }
    }
}

/// First 240 characters with newlines flattened, always followed by `...`.
pub fn excerpt(text: &str) -> String {
    let head: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", head.replace('\n', " "))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatState {
    pub transcript: Vec<ChatMessage>,
    pub prompt: String,
    pub sending: bool,
    context: Vec<ContextLine>,
    show_context: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            transcript: Vec::new(),
            prompt: String::new(),
            sending: false,
            context: Vec::new(),
            show_context: true,
        }
    }
}

impl ChatState {
    pub fn push(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    /// Take the trimmed prompt for sending, echoing it into the transcript.
    /// Returns `None` and changes nothing when the prompt is blank.
    pub fn take_prompt(&mut self) -> Option<String> {
        let message = self.prompt.trim().to_string();
        if message.is_empty() {
            return None;
        }
        self.prompt.clear();
        self.push(ChatMessage::user(message.clone()));
        self.sending = true;
        Some(message)
    }

    pub fn apply_response(&mut self, result: ApiResult<ChatResponse>) {
        match result {
            Ok(response) => {
                let answer = response
                    .answer
                    .filter(|answer| !answer.is_empty())
                    .unwrap_or_else(|| NO_ANSWER.to_string());
                self.push(ChatMessage::assistant(answer));
                self.set_context(response.context.as_deref().unwrap_or_default());
            }
            Err(err) => {
                let reason = err.to_string();
                let reason = if reason.is_empty() {
                    REQUEST_FAILED.to_string()
                } else {
                    reason
                };
                tracing::warn!("chat request failed: {}", reason);
                self.push(ChatMessage::assistant(format!("Error: {reason}")));
            }
        }
        self.sending = false;
    }

    pub fn set_context(&mut self, snippets: &[ContextSnippet]) {
        self.context = snippets.iter().map(ContextLine::from).collect();
    }

    pub fn context(&self) -> &[ContextLine] {
        &self.context
    }

    pub fn show_context(&self) -> bool {
        self.show_context
    }

    /// Flipping the toggle either way drops what is on screen.
    pub fn set_show_context(&mut self, show: bool) {
        self.show_context = show;
        self.context.clear();
    }

    pub fn context_visible(&self) -> bool {
        self.show_context && !self.context.is_empty()
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.context.clear();
    }
}
