//! HTTP surface for scanner-rs
//!
//! Thin axum layer over the domain crates: the reference-list endpoint
//! (never fails for data-availability reasons) and the streaming analysis
//! endpoint (newline-delimited JSON frames over one connection).

pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod state;

pub use app::router;
pub use config::ServerConfig;
pub use state::AppState;
