//! Client error types
//!
//! Repositories and the HTTP client fail with [`ClientError`]. The list
//! substrate never lets those escape to its callers: every failure is
//! funnelled through [`ErrorInfo`] and kept as a displayable message.

mod normalize;

pub use normalize::{ErrorInfo, UNKNOWN_ERROR_MESSAGE, extract_error_message};

use crate::token::TokenStoreError;
use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Structured error body returned by the backend
///
/// The backend answers failures with `{"message": ...}` or `{"error": ...}`,
/// sometimes with a `code` (string or number).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// `true` when the body carries something worth showing
    pub fn is_structured(&self) -> bool {
        non_empty(self.message.as_deref()).is_some() || non_empty(self.error.as_deref()).is_some()
    }

    /// Backend code rendered as text
    pub fn code_text(&self) -> Option<String> {
        match self.code.as_ref()? {
            serde_json::Value::String(s) => non_empty(Some(s.as_str())).map(str::to_string),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn summary(&self) -> &str {
        non_empty(self.message.as_deref())
            .or(non_empty(self.error.as_deref()))
            .unwrap_or("request failed")
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error response with a structured JSON body
    #[error("HTTP {status}: {}", .body.summary())]
    Api { status: StatusCode, body: ApiErrorBody },

    /// Error response without a usable body
    #[error("HTTP {status}: {text}")]
    Status { status: StatusCode, text: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The repository does not implement this operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// The owning scope was torn down before the request completed
    #[error("Request cancelled")]
    Cancelled,

    /// Access token storage failed
    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenStoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bare message raised by a caller-supplied action
    #[error("{0}")]
    Message(String),
}

impl ClientError {
    /// HTTP status of the failure, when there is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<String> for ClientError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for ClientError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
