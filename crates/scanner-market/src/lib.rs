//! Reference stock universe for scanner-rs
//!
//! This crate owns the daily reference list of listed securities:
//!
//! - Fetching the full universe from a market-data provider (Tushare)
//! - Persisting it as a single atomically-replaced JSON snapshot
//! - Deciding snapshot freshness against a business-day cutoff
//! - Degrading gracefully when the provider or the cache is unavailable
//!
//! The central entry point is [`StockListService::get_list`], which never
//! fails outward: a provider outage falls back to the last good snapshot,
//! and a missing snapshot falls back to an empty list flagged as degraded.

pub mod clock;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod freshness;
pub mod model;
pub mod service;
pub mod store;
pub mod tushare;

// Re-export main types for convenience
pub use clock::{Clock, SystemClock};
pub use config::MarketConfig;
pub use error::{CacheError, FetchError};
pub use fetcher::StockListFetcher;
pub use freshness::FreshnessPolicy;
pub use model::{Snapshot, StockInfo};
pub use service::{StockList, StockListService};
pub use store::SnapshotStore;
pub use tushare::{TushareClient, TushareConfig};
