//! HTTP fetching module
//!
//! All network access of the auditor and the llms.txt generator goes through
//! the [`Fetcher`] trait, so tests can swap in canned responses and the core
//! checks never depend on a concrete HTTP client.

mod http;

pub use http::{build_http_client, HttpFetcher, RETRY_STATUSES};

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while fetching a resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// A fetched HTTP response
///
/// Any status code is a successful fetch at this level; callers decide what a
/// non-200 status means for them.
#[derive(Debug, Clone, Default)]
pub struct FetchedResponse {
    /// Final URL after redirects
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Response body decoded as text
    pub body: String,

    /// Response headers with lowercase names
    pub headers: HashMap<String, String>,
}

impl FetchedResponse {
    /// Returns true when the response carries usable content (HTTP 200)
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Size of the body in bytes
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

/// Abstraction over the HTTP client
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs a GET request
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedResponse)` - A response was received (any status code)
    /// * `Err(FetchError)` - Transport failure, timeout, or oversized body
    async fn get(&self, url: &str) -> FetchResult<FetchedResponse>;

    /// Performs a HEAD request and returns the status code
    async fn head(&self, url: &str) -> FetchResult<u16>;
}
