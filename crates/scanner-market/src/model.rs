//! Reference universe data types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One listed security in the reference universe.
///
/// `code` is the exchange-qualified identifier (e.g. `600000.SH`) and is
/// unique within a snapshot. Items are immutable once stored; a new daily
/// snapshot replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    /// Exchange-qualified code, e.g. `600000.SH`
    pub code: String,
    /// Bare ticker without the exchange suffix, e.g. `600000`
    pub symbol: String,
    /// Listed company name
    pub name: String,
    pub area: Option<String>,
    pub industry: Option<String>,
    /// Board segment (main board, ChiNext, STAR, ...)
    pub market: Option<String>,
    /// Listing date as `YYYYMMDD`
    pub list_date: Option<String>,
}

/// The persisted daily snapshot: the full universe plus its refresh time.
///
/// Serialized layout is fixed:
/// `{ "updateTime": "YYYY-MM-DD HH:MM:SS", "data": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "updateTime", with = "ts_format")]
    pub update_time: NaiveDateTime,
    pub data: Vec<StockInfo>,
}

impl Snapshot {
    pub fn new(update_time: NaiveDateTime, data: Vec<StockInfo>) -> Self {
        Self { update_time, data }
    }
}

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS` timestamp spelling used on
/// the wire and in the persisted snapshot.
pub mod ts_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
