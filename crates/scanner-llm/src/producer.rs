//! LLM-backed analysis producer

use std::sync::LazyLock;

use futures::StreamExt;
use regex::Regex;
use scanner_stream::{
    AnalysisConfig, AnalysisProducer, FrameStream, MarketType, ProducerError, StreamFrame,
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

use crate::client::ChatClient;
use crate::config::GatewayConfig;
use crate::prompt;

static SCORE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)score\s*[:：]\s*(\d{1,3})").ok());

/// Produces analysis frames by streaming completions from a chat gateway.
///
/// One client is built per opened stream so per-request config overrides
/// (custom gateway, model, timeout) apply cleanly.
pub struct LlmAnalysisProducer {
    defaults: GatewayConfig,
}

impl LlmAnalysisProducer {
    pub fn new(defaults: GatewayConfig) -> Self {
        Self { defaults }
    }
}

impl AnalysisProducer for LlmAnalysisProducer {
    fn analyze_one(&self, code: &str, market: MarketType, config: &AnalysisConfig) -> FrameStream {
        let gateway = self.defaults.merged(config);
        let code = code.to_string();
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            match ChatClient::new(gateway) {
                Ok(client) => {
                    analyze_code(&client, &code, market, &tx).await;
                }
                // Without a client nothing in this stream can proceed.
                Err(err) => {
                    let _ = tx.send(Err(ProducerError::from(err))).await;
                }
            }
        });

        Box::pin(ReceiverStream::new(rx))
    }

    fn analyze_batch(
        &self,
        codes: &[String],
        market: MarketType,
        config: &AnalysisConfig,
    ) -> FrameStream {
        let gateway = self.defaults.merged(config);
        let codes = codes.to_vec();
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            let client = match ChatClient::new(gateway) {
                Ok(client) => client,
                Err(err) => {
                    let _ = tx.send(Err(ProducerError::from(err))).await;
                    return;
                }
            };

            for code in &codes {
                if !analyze_code(&client, code, market, &tx).await {
                    return; // consumer hung up
                }
            }
            info!(count = codes.len(), "batch analysis finished");
        });

        Box::pin(ReceiverStream::new(rx))
    }
}

/// Analyze one code, emitting progress frames and one terminal frame.
///
/// Returns `false` when the receiver is gone and the caller should stop.
async fn analyze_code(
    client: &ChatClient,
    code: &str,
    market: MarketType,
    tx: &mpsc::Sender<Result<StreamFrame, ProducerError>>,
) -> bool {
    let request = prompt::analysis_prompt(code, market);

    let mut chunks = match client.stream_completion(&request).await {
        Ok(chunks) => chunks,
        Err(err) => {
            warn!(code, error = %err, "completion request failed");
            return send_frame(
                tx,
                StreamFrame::Error {
                    code: Some(code.to_string()),
                    message: err.to_string(),
                },
            )
            .await;
        }
    };

    let mut analysis = String::new();
    while let Some(delta) = chunks.next().await {
        match delta {
            Ok(text) => {
                analysis.push_str(&text);
                let frame = StreamFrame::Progress {
                    code: code.to_string(),
                    chunk: text,
                };
                if !send_frame(tx, frame).await {
                    return false;
                }
            }
            Err(err) => {
                warn!(code, error = %err, "completion stream broke mid-generation");
                return send_frame(
                    tx,
                    StreamFrame::Error {
                        code: Some(code.to_string()),
                        message: err.to_string(),
                    },
                )
                .await;
            }
        }
    }

    let score = extract_score(&analysis);
    send_frame(
        tx,
        StreamFrame::Result {
            code: code.to_string(),
            analysis,
            score,
        },
    )
    .await
}

async fn send_frame(
    tx: &mpsc::Sender<Result<StreamFrame, ProducerError>>,
    frame: StreamFrame,
) -> bool {
    tx.send(Ok(frame)).await.is_ok()
}

/// Lift a `Score: N` rating (0-100) out of the generated text.
fn extract_score(text: &str) -> Option<u8> {
    let re = SCORE_RE.as_ref()?;
    let captures = re.captures(text)?;
    let value: u16 = captures.get(1)?.as_str().parse().ok()?;
    u8::try_from(value).ok().filter(|score| *score <= 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_score_basic() {
        assert_eq!(extract_score("Solid outlook.\nScore: 72"), Some(72));
    }

    #[test]
    fn test_extract_score_case_and_fullwidth_colon() {
        assert_eq!(extract_score("score: 5"), Some(5));
        assert_eq!(extract_score("SCORE： 88"), Some(88));
    }

    #[test]
    fn test_extract_score_rejects_out_of_range() {
        assert_eq!(extract_score("Score: 250"), None);
    }

    #[test]
    fn test_extract_score_absent() {
        assert_eq!(extract_score("no rating given"), None);
    }

    #[test]
    fn test_extract_score_takes_first_match() {
        assert_eq!(extract_score("Score: 60 ... revised Score: 80"), Some(60));
    }
}
