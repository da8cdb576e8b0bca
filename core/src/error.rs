//! Error types for the blog API client.
//!
//! # Design
//! Three failure families reach callers: the transport could not complete
//! the round-trip, the server answered with a structured error body, or the
//! create call failed with a generic message. Create deliberately does not
//! inspect the error body, so it gets its own variant rather than `Server`.

use serde_json::Value;

/// Errors returned by `BlogClient` parse methods and by transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-2xx response; `payload` is the server's error body.
    #[error("HTTP {status}: {}", describe(.payload))]
    Server { status: u16, payload: Value },

    /// Non-2xx response to a create request. The body is not inspected.
    #[error("Failed to create blog")]
    CreateFailed { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Build a `Server` error from a raw response body. Bodies that are not
    /// JSON are kept as a JSON string; an empty body becomes `null`.
    pub fn server(status: u16, body: &str) -> Self {
        let payload = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
        };
        ApiError::Server { status, payload }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::CreateFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// The server's error body, for the operations that surface it.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Server { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Human-readable text for the collection's error slot: the server's
    /// `message` field when there is one, otherwise the display form.
    pub fn rejection_message(&self) -> String {
        match self {
            ApiError::Server { payload, .. } => match server_message(payload) {
                Some(message) => message.to_string(),
                None => self.to_string(),
            },
            other => other.to_string(),
        }
    }
}

fn server_message(payload: &Value) -> Option<&str> {
    payload
        .get("message")
        .or_else(|| payload.get("error"))
        .and_then(Value::as_str)
}

fn describe(payload: &Value) -> String {
    match payload {
        Value::Null => "no error body".to_string(),
        Value::String(text) => text.clone(),
        other => server_message(other)
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}
