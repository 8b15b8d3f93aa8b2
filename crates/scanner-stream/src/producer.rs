//! Analysis producer seam

use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

use crate::frame::StreamFrame;
use crate::request::{AnalysisConfig, MarketType};

/// Lazy, ordered sequence of frames for one request.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<StreamFrame, ProducerError>> + Send>>;

/// Unrecoverable producer-level fault.
///
/// A failure attributable to one requested code must be surfaced in-band
/// as a terminal [`StreamFrame::Error`] for that code; `ProducerError` is
/// reserved for faults that invalidate the rest of the stream.
#[derive(Debug, Clone, Error)]
#[error("analysis producer failed: {0}")]
pub struct ProducerError(String);

impl ProducerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Produces analysis frames for requested codes.
///
/// Implementations yield zero or more `Progress` frames per code followed
/// by exactly one terminal `Result` or `Error` frame, in their own order.
/// The gateway relays frames as-is and adds the header and the closing
/// sentinel itself; producers must not emit either.
pub trait AnalysisProducer: Send + Sync {
    /// Analyze a single code.
    fn analyze_one(&self, code: &str, market: MarketType, config: &AnalysisConfig) -> FrameStream;

    /// Analyze a batch of codes, yielding frames per code in request order.
    fn analyze_batch(
        &self,
        codes: &[String],
        market: MarketType,
        config: &AnalysisConfig,
    ) -> FrameStream;
}
