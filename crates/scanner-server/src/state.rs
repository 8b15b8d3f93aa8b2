//! Shared application state

use std::sync::Arc;

use scanner_llm::LlmAnalysisProducer;
use scanner_market::{StockListService, SystemClock, TushareClient};
use scanner_stream::StreamGateway;

use crate::config::ServerConfig;

/// Shared state for all handlers.
pub struct AppState {
    pub stock_list: StockListService,
    pub gateway: StreamGateway,
    pub config: ServerConfig,
}

impl AppState {
    /// Wire the production collaborators from configuration.
    pub fn from_config(config: ServerConfig) -> anyhow::Result<Arc<Self>> {
        let fetcher = Arc::new(TushareClient::new(config.tushare.clone())?);
        let stock_list =
            StockListService::new(fetcher, Arc::new(SystemClock), config.market.clone());

        let producer = Arc::new(LlmAnalysisProducer::new(config.gateway.clone()));
        let gateway = StreamGateway::new(producer);

        Ok(Arc::new(Self {
            stock_list,
            gateway,
            config,
        }))
    }

    /// Assemble state from pre-built collaborators (tests, alternative wiring).
    pub fn new(
        stock_list: StockListService,
        gateway: StreamGateway,
        config: ServerConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            stock_list,
            gateway,
            config,
        })
    }
}
