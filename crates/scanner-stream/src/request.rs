//! Stream request model

use serde::{Deserialize, Serialize};

/// Which market the requested codes belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarketType {
    #[default]
    A,
    US,
    HK,
    ETF,
    LOF,
}

/// Optional per-request overrides for the analysis backend.
///
/// Every field defaults to the server-side gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// One streaming analysis request; lives for the duration of one call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRequest {
    pub codes: Vec<String>,
    #[serde(default)]
    pub market_type: MarketType,
    #[serde(default)]
    pub analysis_config: AnalysisConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{
            "codes": ["600000.SH"],
            "marketType": "A",
            "analysisConfig": {"apiKey": "sk-test", "timeoutSecs": 30}
        }"#;
        let request: StreamRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.codes, vec!["600000.SH"]);
        assert_eq!(request.market_type, MarketType::A);
        assert_eq!(request.analysis_config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(request.analysis_config.timeout_secs, Some(30));
    }

    #[test]
    fn test_market_type_and_config_default() {
        let json = r#"{"codes": ["AAPL"]}"#;
        let request: StreamRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.market_type, MarketType::A);
        assert_eq!(request.analysis_config, AnalysisConfig::default());
    }
}
