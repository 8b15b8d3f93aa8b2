//! LLM-backed analysis producer for scanner-rs
//!
//! Implements the [`scanner_stream::AnalysisProducer`] seam against any
//! OpenAI-compatible chat-completions gateway. Generation is streamed:
//! each content delta becomes a `progress` frame, and the accumulated text
//! becomes the terminal `result` frame for the code, with a 0-100 score
//! lifted from the text when the model provides one.

pub mod client;
pub mod config;
pub mod error;
pub mod producer;
pub mod prompt;

// Re-export main types for convenience
pub use client::ChatClient;
pub use config::GatewayConfig;
pub use error::LlmError;
pub use producer::LlmAnalysisProducer;
