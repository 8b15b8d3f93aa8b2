//! Error types for the LLM gateway

use scanner_stream::ProducerError;
use thiserror::Error;

/// Errors from the chat-completions gateway.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<LlmError> for ProducerError {
    fn from(err: LlmError) -> Self {
        ProducerError::new(err.to_string())
    }
}
