//! OpenAI-compatible chat-completions client with streamed output
//!
//! The gateway emits server-sent events: `data: {json}` lines carrying
//! content deltas, terminated by `data: [DONE]`. Chunk boundaries do not
//! align with line boundaries, so a carry-over buffer reassembles lines
//! across chunks.

use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::error::LlmError;

/// Stream of content deltas from one completion call.
pub type ChatStream = ReceiverStream<Result<String, LlmError>>;

/// Client for an OpenAI-compatible chat-completions gateway.
pub struct ChatClient {
    client: Client,
    config: GatewayConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Deserialize, Default)]
struct ChunkDelta {
    content: Option<String>,
}

impl ChatClient {
    /// Create a new client with the given configuration
    pub fn new(config: GatewayConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Start a streamed completion for the prompt.
    ///
    /// Fails fast on connection or non-success status; errors after the
    /// stream started arrive in-band as `Err` items.
    pub async fn stream_completion(&self, prompt: &str) -> Result<ChatStream, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: true,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut carry = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(err) => {
                        let _ = tx.send(Err(LlmError::Network(err))).await;
                        return;
                    }
                };

                carry.push_str(&String::from_utf8_lossy(&chunk));
                while let Some(pos) = carry.find('\n') {
                    let line: String = carry.drain(..=pos).collect();
                    match parse_sse_line(line.trim()) {
                        SseLine::Delta(text) => {
                            if tx.send(Ok(text)).await.is_err() {
                                return; // consumer hung up
                            }
                        }
                        SseLine::Done => return,
                        SseLine::Skip => {}
                    }
                }
            }
            debug!("completion stream ended without [DONE]");
        });

        Ok(ReceiverStream::new(rx))
    }
}

enum SseLine {
    Delta(String),
    Done,
    Skip,
}

/// Decode one SSE line into a content delta, if it carries one.
fn parse_sse_line(line: &str) -> SseLine {
    let Some(payload) = line.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let payload = payload.trim();
    if payload == "[DONE]" {
        return SseLine::Done;
    }

    match serde_json::from_str::<ChunkPayload>(payload) {
        Ok(parsed) => {
            let delta = parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
                .unwrap_or_default();
            if delta.is_empty() {
                SseLine::Skip
            } else {
                SseLine::Delta(delta)
            }
        }
        Err(err) => {
            debug!(error = %err, "skipping undecodable stream line");
            SseLine::Skip
        }
    }
}
