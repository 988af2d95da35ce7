//! Error types for store, configuration, and property mapping operations.

use thiserror::Error;

/// Errors produced by a task store call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("store returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for logging.
        body: String,
    },
    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Errors produced while assembling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is missing or blank.
    #[error("missing required setting {0}")]
    MissingVar(String),
    /// A setting is present but unusable.
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Errors produced while reading a record's properties.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A property value does not have the structure its kind requires.
    #[error("property `{property}` is not a valid {expected}")]
    Shape {
        /// Property name as declared in the schema.
        property: String,
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
