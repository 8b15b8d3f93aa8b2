//! Error types for reference universe operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the snapshot store.
///
/// A missing snapshot and a corrupt one are distinct outcomes: the service
/// treats both as "no usable cache", but a corrupt file is logged loudly
/// since it means a previous writer misbehaved.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No snapshot has been persisted yet
    #[error("no snapshot at {0}")]
    NotFound(PathBuf),

    /// The persisted snapshot exists but cannot be decoded
    #[error("corrupt snapshot at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot could not be encoded for persistence
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// Filesystem failure while reading or replacing the snapshot
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a reference-list provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS, ...)
    #[error("provider request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered but refused the request
    #[error("provider rejected request: {0}")]
    Rejected(String),

    /// The provider answered with a payload we cannot interpret
    #[error("provider response malformed: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_display() {
        let err = CacheError::NotFound(PathBuf::from("/tmp/stock_list.json"));
        assert_eq!(err.to_string(), "no snapshot at /tmp/stock_list.json");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Rejected("token invalid".to_string());
        assert_eq!(err.to_string(), "provider rejected request: token invalid");
    }
}
