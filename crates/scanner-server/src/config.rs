//! Server configuration
//!
//! All process configuration is read once at startup into an immutable
//! struct; components receive it (or slices of it) at construction and
//! never consult the environment themselves.

use scanner_llm::GatewayConfig;
use scanner_market::{MarketConfig, TushareConfig};
use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8888;

/// Top-level configuration for the scanner server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Announcement text surfaced on the config endpoint
    pub announcement: String,

    /// Defaults for the analysis gateway (per-request overridable)
    pub gateway: GatewayConfig,

    /// Reference universe settings (cache path, cutoff, suffix filter)
    pub market: MarketConfig,

    /// Reference-data provider credentials
    pub tushare: TushareConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `HOST`, `PORT`, `ANNOUNCEMENT_TEXT`,
    /// `TUSHARE_TOKEN`, `STOCK_CACHE_PATH`, plus the gateway variables
    /// read by [`GatewayConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let token = std::env::var("TUSHARE_TOKEN").unwrap_or_default();
        if token.is_empty() {
            warn!("TUSHARE_TOKEN not set, reference list refreshes will be rejected upstream");
        }

        let market = match std::env::var("STOCK_CACHE_PATH") {
            Ok(path) => MarketConfig::new(path),
            Err(_) => MarketConfig::default(),
        };

        Self {
            host,
            port,
            announcement: std::env::var("ANNOUNCEMENT_TEXT").unwrap_or_default(),
            gateway: GatewayConfig::from_env(),
            market,
            tushare: TushareConfig::new(token),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            announcement: String::new(),
            gateway: GatewayConfig::default(),
            market: MarketConfig::default(),
            tushare: TushareConfig::new(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
