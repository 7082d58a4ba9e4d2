//! Response cache module
//!
//! Keeps fetched homepage responses in a local SQLite database so repeated
//! audits of the same site within the TTL skip the network:
//! - Entries are keyed by the SHA-256 of the URL
//! - Expired entries are dropped when read
//! - The whole cache can be cleared or summarized

mod schema;
mod sqlite;

pub use sqlite::{cache_key, SqliteCache};

use crate::fetch::FetchedResponse;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache usage summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of stored responses, expired ones included
    pub entries: u64,

    /// Total body size in bytes
    pub size_bytes: u64,
}

/// Trait for response cache backends
pub trait ResponseCache: Send {
    /// Returns the cached response for a URL if it has not expired
    fn get(&mut self, url: &str) -> CacheResult<Option<FetchedResponse>>;

    /// Stores a response, replacing any previous entry for the URL
    fn put(&mut self, url: &str, response: &FetchedResponse) -> CacheResult<()>;

    /// Removes every entry and returns how many were removed
    fn clear(&mut self) -> CacheResult<u64>;

    /// Returns usage statistics
    fn stats(&self) -> CacheResult<CacheStats>;
}

/// Opens (or creates) the cache database, creating parent directories
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
/// * `ttl_secs` - Entry lifetime in seconds
pub fn open_cache(path: &Path, ttl_secs: u64) -> CacheResult<SqliteCache> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    SqliteCache::new(path, ttl_secs)
}
