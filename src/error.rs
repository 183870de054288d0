//! Error types for the chat client.

use thiserror::Error;

/// Failures from the remote API gateway.
///
/// `Display` yields the human-readable message that is shown inline, so the
/// variants carry the already-extracted text rather than wrapping sources.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-success HTTP status with the extracted detail message
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Network failure (connection refused, DNS, CORS, ...)
    #[error("{0}")]
    Transport(String),

    /// Body was not the expected JSON
    #[error("{0}")]
    Decode(String),

    /// Request body could not be built
    #[error("{0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Durable storage failures. These never reach the user.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Input rejected before any request is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a file.")]
    MissingFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_message_only() {
        let err = ApiError::status(401, "Invalid credentials");
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(ApiError::Transport("offline".into()).status_code(), None);
    }

    #[test]
    fn validation_message_is_user_facing() {
        assert_eq!(ValidationError::MissingFile.to_string(), "Please select a file.");
    }
}
