//! Reference list orchestration
//!
//! Ties the freshness policy, the snapshot store, and the provider fetcher
//! together behind one operation that never fails outward. Availability is
//! deliberately prioritized over signaling absence: when both the provider
//! and the cache are unusable the caller gets an empty list with
//! `degraded = true`, not an error.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::MarketConfig;
use crate::fetcher::StockListFetcher;
use crate::freshness::FreshnessPolicy;
use crate::model::{Snapshot, StockInfo};
use crate::store::SnapshotStore;

/// Result of [`StockListService::get_list`].
///
/// `degraded` distinguishes "the universe is empty / served fresh" from
/// "the provider was unreachable and this is fallback data".
#[derive(Debug, Clone, PartialEq)]
pub struct StockList {
    pub update_time: NaiveDateTime,
    pub items: Vec<StockInfo>,
    pub degraded: bool,
}

/// Daily reference list service with a snapshot cache.
pub struct StockListService {
    fetcher: Arc<dyn StockListFetcher>,
    store: SnapshotStore,
    policy: FreshnessPolicy,
    clock: Arc<dyn Clock>,
    allowed_suffixes: Vec<String>,
    // Single-flight guard: concurrent stale readers share one refresh.
    refresh_lock: Mutex<()>,
}

impl StockListService {
    pub fn new(
        fetcher: Arc<dyn StockListFetcher>,
        clock: Arc<dyn Clock>,
        config: MarketConfig,
    ) -> Self {
        Self {
            fetcher,
            store: SnapshotStore::new(config.cache_path),
            policy: FreshnessPolicy::new(config.cutoff),
            clock,
            allowed_suffixes: config.allowed_suffixes,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Get the reference list, refreshing the snapshot when stale.
    ///
    /// Fallback chain: fresh fetch -> last good snapshot -> empty list.
    pub async fn get_list(&self, force_refresh: bool) -> StockList {
        let now = self.clock.now();
        let stale = force_refresh || self.policy.needs_refresh(self.store.last_refresh(), now);

        if !stale {
            match self.store.load() {
                Ok(snapshot) => {
                    debug!(count = snapshot.data.len(), "serving reference list from snapshot");
                    return StockList {
                        update_time: snapshot.update_time,
                        items: snapshot.data,
                        degraded: false,
                    };
                }
                // Corrupt or unreadable snapshot counts as absent and
                // triggers a refresh attempt.
                Err(err) => warn!(error = %err, "snapshot unusable, treating as absent"),
            }
        }

        self.refresh(force_refresh).await
    }

    async fn refresh(&self, forced: bool) -> StockList {
        let _guard = self.refresh_lock.lock().await;

        // A concurrent caller may have refreshed while we waited.
        if !forced && !self.policy.needs_refresh(self.store.last_refresh(), self.clock.now()) {
            if let Ok(snapshot) = self.store.load() {
                debug!("refresh coalesced with concurrent caller");
                return StockList {
                    update_time: snapshot.update_time,
                    items: snapshot.data,
                    degraded: false,
                };
            }
        }

        match self.fetcher.fetch_all().await {
            Ok(items) => {
                let items = self.filter_universe(items);
                let snapshot = Snapshot::new(self.clock.now(), items);
                if let Err(err) = self.store.save(&snapshot) {
                    // Keep serving the fetched data; only persistence failed.
                    warn!(error = %err, "failed to persist refreshed snapshot");
                }
                info!(count = snapshot.data.len(), "reference list refreshed");
                StockList {
                    update_time: snapshot.update_time,
                    items: snapshot.data,
                    degraded: false,
                }
            }
            Err(err) => {
                warn!(error = %err, "provider fetch failed, falling back to snapshot");
                match self.store.load() {
                    Ok(snapshot) => StockList {
                        update_time: snapshot.update_time,
                        items: snapshot.data,
                        degraded: true,
                    },
                    Err(cache_err) => {
                        warn!(error = %cache_err, "no usable snapshot, returning empty list");
                        StockList {
                            update_time: self.clock.now(),
                            items: Vec::new(),
                            degraded: true,
                        }
                    }
                }
            }
        }
    }

    /// Retain only allowed exchange suffixes, dropping duplicate codes
    /// while preserving first-occurrence order.
    fn filter_universe(&self, items: Vec<StockInfo>) -> Vec<StockInfo> {
        let mut seen = HashSet::new();
        items
            .into_iter()
            .filter(|item| {
                let suffix = item.code.rsplit('.').next().unwrap_or_default();
                item.code.contains('.') && self.allowed_suffixes.iter().any(|s| s == suffix)
            })
            .filter(|item| seen.insert(item.code.clone()))
            .collect()
    }
}
