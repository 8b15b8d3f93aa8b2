//! Durable snapshot persistence
//!
//! One named snapshot lives at a fixed path and is replaced wholesale on
//! every successful refresh. Replacement is write-to-temp + rename so a
//! concurrent reader never observes a partially written file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::CacheError;
use crate::model::Snapshot;

/// File-backed store for the reference snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and decode the persisted snapshot.
    ///
    /// A missing file is [`CacheError::NotFound`]; an undecodable file is
    /// [`CacheError::Corrupt`]. The two are never conflated.
    pub fn load(&self) -> Result<Snapshot, CacheError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CacheError::NotFound(self.path.clone()));
            }
            Err(err) => return Err(CacheError::Io(err)),
        };

        serde_json::from_slice(&bytes).map_err(|source| CacheError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Atomically replace the persisted snapshot.
    ///
    /// The record is written to a sibling temp file and renamed into place,
    /// so concurrent [`load`](Self::load) calls see either the old or the
    /// new snapshot, never a torn one.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(snapshot).map_err(CacheError::Encode)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Metadata-only freshness probe: the snapshot file's mtime.
    ///
    /// Returns `None` when the file is missing or its metadata cannot be
    /// read; the freshness policy resolves `None` toward refreshing.
    pub fn last_refresh(&self) -> Option<NaiveDateTime> {
        let modified = fs::metadata(&self.path).ok()?.modified().ok()?;
        let local: DateTime<Local> = modified.into();
        Some(local.naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StockInfo;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn item(code: &str, name: &str) -> StockInfo {
        StockInfo {
            code: code.to_string(),
            symbol: code.split('.').next().unwrap_or(code).to_string(),
            name: name.to_string(),
            area: None,
            industry: None,
            market: None,
            list_date: None,
        }
    }

    fn snapshot(items: Vec<StockInfo>) -> Snapshot {
        let update_time = NaiveDate::from_ymd_opt(2025, 4, 29)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();
        Snapshot::new(update_time, items)
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("stock_list.json"));
        assert!(matches!(store.load(), Err(CacheError::NotFound(_))));
        assert!(store.last_refresh().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips_in_order() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("stock_list.json"));

        let original = snapshot(vec![
            item("600000.SH", "Pudong Development Bank"),
            item("000001.SZ", "Ping An Bank"),
            item("000002.SZ", "Vanke"),
        ]);
        store.save(&original).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, original);
        let codes: Vec<_> = loaded.data.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["600000.SH", "000001.SZ", "000002.SZ"]);
    }

    #[test]
    fn test_corrupt_file_is_not_treated_as_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stock_list.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = SnapshotStore::new(&path);
        assert!(matches!(store.load(), Err(CacheError::Corrupt { .. })));
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("stock_list.json"));

        store
            .save(&snapshot(vec![item("600000.SH", "Pudong Development Bank")]))
            .unwrap();
        store.save(&snapshot(vec![item("000001.SZ", "Ping An Bank")])).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].code, "000001.SZ");
        // No temp file left behind
        assert!(!dir.path().join("stock_list.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("data").join("cache").join("stock_list.json"));
        store.save(&snapshot(vec![])).unwrap();
        assert!(store.load().is_ok());
    }

    #[test]
    fn test_last_refresh_present_after_save() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("stock_list.json"));
        store.save(&snapshot(vec![])).unwrap();
        assert!(store.last_refresh().is_some());
    }
}
