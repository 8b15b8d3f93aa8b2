//! Stream gateway: validate, classify, relay
//!
//! The gateway is a pass-through multiplexer, not a scheduler: frames are
//! relayed to the transport in the exact order produced, with at most one
//! frame in flight so a slow consumer throttles the producer. A dropped
//! receiver (client disconnect) stops the relay task, which releases the
//! producer stream on its way out.

use std::sync::Arc;

use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

use crate::frame::{StreamFrame, StreamMode, StreamStatus};
use crate::producer::AnalysisProducer;
use crate::request::StreamRequest;

/// Request rejected before any frame was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("no analysis codes supplied")]
    EmptyRequest,
}

/// Fans one request into an ordered frame sequence.
pub struct StreamGateway {
    producer: Arc<dyn AnalysisProducer>,
}

impl StreamGateway {
    pub fn new(producer: Arc<dyn AnalysisProducer>) -> Self {
        Self { producer }
    }

    /// Open a frame stream for the request.
    ///
    /// Validation happens here, before any frame exists; once `Ok` is
    /// returned the header frame is already committed to the stream.
    pub fn open(&self, request: StreamRequest) -> Result<ReceiverStream<StreamFrame>, StreamError> {
        let codes = dedup_codes(&request.codes);
        if codes.is_empty() {
            return Err(StreamError::EmptyRequest);
        }

        let mode = if codes.len() == 1 {
            StreamMode::Single
        } else {
            StreamMode::Batch
        };

        // Capacity 1: single-hop cooperative backpressure.
        let (tx, rx) = mpsc::channel(1);
        let producer = Arc::clone(&self.producer);
        let market = request.market_type;
        let config = request.analysis_config;

        tokio::spawn(async move {
            let header = StreamFrame::Header {
                mode,
                codes: codes.clone(),
            };
            if tx.send(header).await.is_err() {
                return;
            }

            let mut frames = match mode {
                StreamMode::Single => producer.analyze_one(&codes[0], market, &config),
                StreamMode::Batch => producer.analyze_batch(&codes, market, &config),
            };

            loop {
                match frames.next().await {
                    Some(Ok(frame)) => {
                        if tx.send(frame).await.is_err() {
                            debug!("client disconnected, stopping relay");
                            return;
                        }
                    }
                    Some(Err(fault)) => {
                        // Hard fault: the response status is already on the
                        // wire, so signal in-band and close.
                        error!(error = %fault, "producer hard fault, terminating stream");
                        let _ = tx
                            .send(StreamFrame::Error {
                                code: None,
                                message: fault.to_string(),
                            })
                            .await;
                        let _ = tx
                            .send(StreamFrame::Complete {
                                status: StreamStatus::Aborted,
                            })
                            .await;
                        return;
                    }
                    None => {
                        let _ = tx
                            .send(StreamFrame::Complete {
                                status: StreamStatus::Ok,
                            })
                            .await;
                        return;
                    }
                }
            }
        });

        Ok(ReceiverStream::new(rx))
    }
}

/// Trim codes, drop empties, and deduplicate preserving first occurrence.
fn dedup_codes(codes: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .filter(|code| seen.insert(code.to_string()))
        .map(str::to_string)
        .collect()
}
