//! Tushare reference-data client
//!
//! Speaks the Tushare Pro HTTP protocol: a single POST endpoint taking
//! `{api_name, token, params, fields}` and answering with a columnar
//! `{fields: [...], items: [[...], ...]}` payload.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::fetcher::StockListFetcher;
use crate::model::StockInfo;

const DEFAULT_TUSHARE_API_BASE: &str = "http://api.tushare.pro";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const STOCK_BASIC_FIELDS: &str = "ts_code,symbol,name,area,industry,market,list_date";

/// Configuration for the Tushare client
#[derive(Debug, Clone)]
pub struct TushareConfig {
    /// API token for authentication
    pub token: String,

    /// Base URL of the Tushare endpoint (default: `http://api.tushare.pro`)
    pub api_base: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl TushareConfig {
    /// Create a new config with the given token and default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: DEFAULT_TUSHARE_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from the `TUSHARE_TOKEN` environment variable
    pub fn from_env() -> Result<Self, FetchError> {
        let token = std::env::var("TUSHARE_TOKEN").map_err(|_| {
            FetchError::Rejected("TUSHARE_TOKEN environment variable not set".to_string())
        })?;
        Ok(Self::new(token))
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Tushare Pro API client
pub struct TushareClient {
    client: Client,
    config: TushareConfig,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    api_name: &'a str,
    token: &'a str,
    params: Value,
    fields: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    code: i64,
    msg: Option<String>,
    data: Option<ApiData>,
}

#[derive(Deserialize)]
struct ApiData {
    fields: Vec<String>,
    items: Vec<Vec<Value>>,
}

impl TushareClient {
    /// Create a new client with the given configuration
    pub fn new(config: TushareConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn call(&self, api_name: &str, params: Value, fields: &str) -> Result<ApiData, FetchError> {
        let request = ApiRequest {
            api_name,
            token: &self.config.token,
            params,
            fields,
        };

        let response = self
            .client
            .post(&self.config.api_base)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Rejected(format!("HTTP {status}")));
        }

        let body: ApiResponse = response.json().await?;
        if body.code != 0 {
            let msg = body.msg.unwrap_or_else(|| "unknown provider error".to_string());
            return Err(FetchError::Rejected(format!("code {}: {}", body.code, msg)));
        }

        body.data
            .ok_or_else(|| FetchError::Malformed("response carried no data section".to_string()))
    }
}

#[async_trait]
impl StockListFetcher for TushareClient {
    async fn fetch_all(&self) -> Result<Vec<StockInfo>, FetchError> {
        let data = self
            .call(
                "stock_basic",
                serde_json::json!({ "exchange": "", "list_status": "L" }),
                STOCK_BASIC_FIELDS,
            )
            .await?;

        let items = decode_stock_basic(&data.fields, &data.items)?;
        debug!(count = items.len(), "fetched reference list from tushare");
        Ok(items)
    }
}

/// Decode Tushare's columnar `fields`/`items` layout into typed items.
fn decode_stock_basic(fields: &[String], rows: &[Vec<Value>]) -> Result<Vec<StockInfo>, FetchError> {
    let col = |name: &str| -> Result<usize, FetchError> {
        fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| FetchError::Malformed(format!("missing column `{name}`")))
    };

    let ts_code = col("ts_code")?;
    let symbol = col("symbol")?;
    let name = col("name")?;
    let area = col("area")?;
    let industry = col("industry")?;
    let market = col("market")?;
    let list_date = col("list_date")?;

    let required = |row: &[Value], idx: usize, label: &str| -> Result<String, FetchError> {
        row.get(idx)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| FetchError::Malformed(format!("row missing `{label}`")))
    };
    let optional = |row: &[Value], idx: usize| -> Option<String> {
        row.get(idx).and_then(Value::as_str).map(str::to_string)
    };

    rows.iter()
        .map(|row| {
            Ok(StockInfo {
                code: required(row, ts_code, "ts_code")?,
                symbol: required(row, symbol, "symbol")?,
                name: required(row, name, "name")?,
                area: optional(row, area),
                industry: optional(row, industry),
                market: optional(row, market),
                list_date: optional(row, list_date),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<String> {
        ["ts_code", "symbol", "name", "area", "industry", "market", "list_date"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_decode_stock_basic_rows() {
        let rows = vec![
            vec![
                json!("600000.SH"),
                json!("600000"),
                json!("Pudong Development Bank"),
                json!("Shanghai"),
                json!("Banking"),
                json!("Main Board"),
                json!("19991110"),
            ],
            vec![
                json!("000001.SZ"),
                json!("000001"),
                json!("Ping An Bank"),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
            ],
        ];

        let items = decode_stock_basic(&fields(), &rows).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].code, "600000.SH");
        assert_eq!(items[0].industry.as_deref(), Some("Banking"));
        assert_eq!(items[1].code, "000001.SZ");
        assert!(items[1].area.is_none());
    }

    #[test]
    fn test_decode_rejects_missing_column() {
        let fields: Vec<String> = vec!["ts_code".to_string(), "symbol".to_string()];
        let err = decode_stock_basic(&fields, &[]).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_decode_rejects_row_without_code() {
        let rows = vec![vec![
            Value::Null,
            json!("600000"),
            json!("Pudong Development Bank"),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
        ]];
        let err = decode_stock_basic(&fields(), &rows).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_config_defaults() {
        let config = TushareConfig::new("token");
        assert_eq!(config.api_base, DEFAULT_TUSHARE_API_BASE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
