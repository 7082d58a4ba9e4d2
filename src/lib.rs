//! GEO Optimizer: audits how visible a website is to AI search engines
//!
//! This crate fetches a site's robots.txt, llms.txt and homepage, extracts the
//! signals AI crawlers and answer engines rely on, and folds them into a
//! deterministic 0-100 GEO score with recommendations. It also generates an
//! llms.txt index from a site's XML sitemap.

pub mod audit;
pub mod checks;
pub mod config;
pub mod fetch;
pub mod output;
pub mod robots;
pub mod scoring;
pub mod sitemap;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for GEO Optimizer operations
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Cache error: {0}")]
    Cache(#[from] storage::CacheError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] sitemap::SitemapError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("URL contains embedded credentials")]
    Credentials,

    #[error("Host not allowed: {0}")]
    BlockedHost(String),

    #[error("Address {addr} resolved for {host} is in a private or reserved network")]
    PrivateAddress { host: String, addr: std::net::IpAddr },
}

/// Result type alias for GEO Optimizer operations
pub type Result<T> = std::result::Result<T, GeoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use audit::{AuditResult, Auditor};
pub use config::Config;
pub use scoring::{ScoreBand, ScoreBreakdown};
pub use url::{ensure_public_url, normalize_base_url, url_belongs_to_domain};
