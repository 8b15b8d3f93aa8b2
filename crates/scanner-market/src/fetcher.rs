//! Provider seam for the reference universe

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::StockInfo;

/// Supplies the authoritative full reference list.
///
/// Implementations are expected to bound their own network calls with a
/// configured timeout; the service treats a timeout like any other
/// [`FetchError`] and falls back to the cached snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockListFetcher: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<StockInfo>, FetchError>;
}
