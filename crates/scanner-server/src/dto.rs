//! Request and response DTOs

use chrono::NaiveDateTime;
use scanner_market::model::ts_format;
use scanner_market::{StockInfo, StockList};
use serde::{Deserialize, Serialize};

/// Query parameters for the reference list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct StockListQuery {
    #[serde(rename = "forceRefresh", default)]
    pub force_refresh: bool,
}

/// Reference list response: `{ count, updateTime, items, degraded }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockListResponse {
    pub count: usize,
    #[serde(with = "ts_format")]
    pub update_time: NaiveDateTime,
    pub items: Vec<StockInfo>,
    /// True when the data came from the fallback chain rather than a
    /// fresh or valid snapshot (provider outage, empty cache)
    pub degraded: bool,
}

impl From<StockList> for StockListResponse {
    fn from(list: StockList) -> Self {
        Self {
            count: list.items.len(),
            update_time: list.update_time,
            items: list.items,
            degraded: list.degraded,
        }
    }
}

/// System configuration surfaced to the frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub announcement: String,
    pub default_api_url: String,
    pub default_api_model: String,
    pub default_api_timeout: String,
}

/// Health probe response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
