//! Gateway configuration

use scanner_stream::AnalysisConfig;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for an OpenAI-compatible chat-completions gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL of the gateway (default: `https://api.openai.com/v1`)
    pub api_base: String,

    /// Model identifier passed through to the gateway
    pub model: String,

    /// Request timeout in seconds, bounding the whole streamed response
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create config from environment variables
    ///
    /// Reads `API_KEY`, and optionally `API_URL`, `API_MODEL` and
    /// `API_TIMEOUT` (seconds). Missing optionals keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(std::env::var("API_KEY").unwrap_or_default());
        if let Ok(url) = std::env::var("API_URL") {
            config.api_base = url;
        }
        if let Ok(model) = std::env::var("API_MODEL") {
            config.model = model;
        }
        if let Some(timeout) = std::env::var("API_TIMEOUT")
            .ok()
            .and_then(|raw| raw.parse().ok())
        {
            config.timeout_secs = timeout;
        }
        config
    }

    /// Set a custom gateway base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Apply per-request overrides on top of these defaults.
    pub fn merged(&self, overrides: &AnalysisConfig) -> Self {
        Self {
            api_key: overrides.api_key.clone().unwrap_or_else(|| self.api_key.clone()),
            api_base: overrides.api_url.clone().unwrap_or_else(|| self.api_base.clone()),
            model: overrides.model.clone().unwrap_or_else(|| self.model.clone()),
            timeout_secs: overrides.timeout_secs.unwrap_or(self.timeout_secs),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
