//! SQLite response cache
//!
//! This module provides a SQLite-based implementation of the ResponseCache trait.

use crate::fetch::FetchedResponse;
use crate::storage::schema::initialize_schema;
use crate::storage::{CacheResult, CacheStats, ResponseCache};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// Computes the cache key of a URL (hex-encoded SHA-256)
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// SQLite cache backend
pub struct SqliteCache {
    conn: Connection,
    ttl: Duration,
}

impl SqliteCache {
    /// Opens or creates a cache database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `ttl_secs` - Entry lifetime in seconds
    pub fn new(path: &Path, ttl_secs: u64) -> CacheResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn,
            ttl: ttl_duration(ttl_secs),
        })
    }

    /// Creates an in-memory cache (for testing)
    #[cfg(test)]
    pub fn new_in_memory(ttl_secs: u64) -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            ttl: ttl_duration(ttl_secs),
        })
    }

    fn is_expired(&self, cached_at: &str, now: DateTime<Utc>) -> bool {
        match DateTime::parse_from_rfc3339(cached_at) {
            Ok(ts) => now.signed_duration_since(ts.with_timezone(&Utc)) > self.ttl,
            Err(_) => true,
        }
    }

    /// Stores a response with an explicit timestamp
    fn put_at(&mut self, url: &str, response: &FetchedResponse, at: DateTime<Utc>) -> CacheResult<()> {
        let headers = serde_json::to_string(&response.headers)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (key, url, status_code, body, headers, cached_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                cache_key(url),
                url,
                response.status,
                response.body,
                headers,
                at.to_rfc3339()
            ],
        )?;
        Ok(())
    }
}

/// Lifetimes past what chrono can represent never expire
fn ttl_duration(ttl_secs: u64) -> Duration {
    i64::try_from(ttl_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

impl ResponseCache for SqliteCache {
    fn get(&mut self, url: &str) -> CacheResult<Option<FetchedResponse>> {
        let key = cache_key(url);
        let row = self
            .conn
            .query_row(
                "SELECT url, status_code, body, headers, cached_at FROM responses WHERE key = ?1",
                params![key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u16>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((cached_url, status, body, headers, cached_at)) = row else {
            return Ok(None);
        };

        if self.is_expired(&cached_at, Utc::now()) {
            tracing::debug!("Cache entry for {} expired", url);
            self.conn
                .execute("DELETE FROM responses WHERE key = ?1", params![key])?;
            return Ok(None);
        }

        let headers: HashMap<String, String> = serde_json::from_str(&headers)?;
        tracing::debug!("Cache hit for {}", url);

        Ok(Some(FetchedResponse {
            url: cached_url,
            status,
            body,
            headers,
        }))
    }

    fn put(&mut self, url: &str, response: &FetchedResponse) -> CacheResult<()> {
        self.put_at(url, response, Utc::now())
    }

    fn clear(&mut self) -> CacheResult<u64> {
        let removed = self.conn.execute("DELETE FROM responses", [])?;
        Ok(removed as u64)
    }

    fn stats(&self) -> CacheResult<CacheStats> {
        let (entries, size_bytes) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(LENGTH(CAST(body AS BLOB))), 0) FROM responses",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;

        Ok(CacheStats {
            entries: entries.max(0) as u64,
            size_bytes: size_bytes.max(0) as u64,
        })
    }
}
