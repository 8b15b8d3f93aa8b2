//! Configuration for the reference universe service

use chrono::NaiveTime;
use std::path::PathBuf;

use crate::freshness::DEFAULT_CUTOFF;

/// Configuration for [`StockListService`](crate::service::StockListService).
///
/// Passed in as an immutable struct at construction; the service never
/// reads ambient globals.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Path of the persisted snapshot file
    pub cache_path: PathBuf,

    /// Business-day boundary for snapshot freshness
    pub cutoff: NaiveTime,

    /// Exchange suffixes retained when filtering the fetched universe
    /// (matched against the part of `code` after the last `.`)
    pub allowed_suffixes: Vec<String>,
}

impl MarketConfig {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
            ..Self::default()
        }
    }

    /// Set the freshness cutoff time of day
    pub fn with_cutoff(mut self, cutoff: NaiveTime) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Set the retained exchange suffixes
    pub fn with_allowed_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.allowed_suffixes = suffixes;
        self
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("data/cache/stock_list.json"),
            cutoff: DEFAULT_CUTOFF,
            allowed_suffixes: vec!["SH".to_string(), "SZ".to_string()],
        }
    }
}
