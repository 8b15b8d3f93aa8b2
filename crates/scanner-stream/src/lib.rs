//! Streaming analysis multiplexer for scanner-rs
//!
//! One HTTP call fans out into an ordered sequence of heterogeneous JSON
//! frames for one or many analysis targets. This crate owns the frame
//! model, the [`AnalysisProducer`] seam the actual analysis backend plugs
//! into, and the [`StreamGateway`] that validates a request and relays the
//! producer's frames to the transport without reordering or buffering.

pub mod frame;
pub mod gateway;
pub mod producer;
pub mod request;

// Re-export main types for convenience
pub use frame::{StreamFrame, StreamMode, StreamStatus};
pub use gateway::{StreamError, StreamGateway};
pub use producer::{AnalysisProducer, FrameStream, ProducerError};
pub use request::{AnalysisConfig, MarketType, StreamRequest};
