//! Error types for the gateway adapter.
//!
//! Every variant is fatal for the invocation that raised it. The adapter never
//! recovers or retries; the Lambda handler turns these into a `Diagnostic` and
//! the runtime reports the invocation as failed.

use thiserror::Error;

/// Errors raised while translating between gateway events and the application.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A required key of the event envelope is absent or has the wrong shape
    #[error("Malformed gateway event: {0}")]
    MalformedEvent(String),

    /// The event body claims to be base64 but is not
    #[error("Failed to decode base64 request body: {0}")]
    BodyDecode(#[from] base64::DecodeError),

    /// A response header name or value is not valid UTF-8
    #[error("Response header is not valid UTF-8: {0}")]
    Encoding(String),

    /// An adapter configuration value could not be understood
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdapterError {
    /// Short, stable identifier reported as the Lambda `errorType`.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::MalformedEvent(_) => "MalformedEvent",
            Self::BodyDecode(_) => "BodyDecodeError",
            Self::Encoding(_) => "EncodingError",
            Self::Config(_) => "ConfigError",
        }
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedEvent(error.to_string())
    }
}
