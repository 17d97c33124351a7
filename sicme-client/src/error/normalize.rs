//! Error normalization
//!
//! Single chokepoint turning any failure into one `{message, code?}` value.
//! Precedence: HTTP body `message` > HTTP body `error` > native error
//! message > stringified fallback > [`UNKNOWN_ERROR_MESSAGE`].

use super::{ClientError, non_empty};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Shown when nothing better can be extracted
pub const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido";

/// Normalized error, ready for a banner or a log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ERROR_MESSAGE)
    }

    /// Normalize a client error.
    pub fn from_client_error(err: &ClientError) -> Self {
        match err {
            ClientError::Api { status, body } => {
                let code = body
                    .code_text()
                    .unwrap_or_else(|| status.as_u16().to_string());
                let message = non_empty(body.message.as_deref())
                    .or(non_empty(body.error.as_deref()))
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                Self::new(message).with_code(code)
            }
            ClientError::Message(message) => match non_empty(Some(message.as_str())) {
                Some(m) => Self::new(m),
                None => Self::unknown(),
            },
            ClientError::NotSupported(_) => Self::new(err.to_string()).with_code("NOT_SUPPORTED"),
            ClientError::Cancelled => Self::new(err.to_string()).with_code("CANCELLED"),
            other => {
                let info = Self::new(other.to_string());
                match other.status() {
                    Some(status) => info.with_code(status.as_u16().to_string()),
                    None => info,
                }
            }
        }
    }

    /// Normalize an arbitrary JSON error shape.
    ///
    /// Accepts the shapes an HTTP-client error serializes to
    /// (`{"response": {"data": {"message" | "error"}}}`), a plain error
    /// object (`{"message"}`), a bare string, or anything else.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => {
                let data = value.pointer("/response/data");
                let code = data
                    .and_then(|d| d.get("code"))
                    .or_else(|| value.get("code"))
                    .or_else(|| value.pointer("/response/status"))
                    .and_then(value_code);

                let message = data
                    .and_then(|d| string_field(d, "message"))
                    .or_else(|| data.and_then(|d| string_field(d, "error")))
                    .or_else(|| string_field(value, "message"));

                match message {
                    Some(m) => Self {
                        message: m.to_string(),
                        code,
                    },
                    None => Self::unknown(),
                }
            }
            Value::String(s) => match non_empty(Some(s.as_str())) {
                Some(m) => Self::new(m),
                None => Self::unknown(),
            },
            _ => Self::unknown(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&ClientError> for ErrorInfo {
    fn from(err: &ClientError) -> Self {
        Self::from_client_error(err)
    }
}

/// Message of a client error, normalized.
pub fn extract_error_message(err: &ClientError) -> String {
    ErrorInfo::from_client_error(err).message
}

fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    non_empty(value.get(key).and_then(Value::as_str))
}

fn value_code(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(Some(s.as_str())).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
