use crate::output::OutputFormat;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "GEO-Optimizer/2.0 (+https://github.com/auriti-labs/geo-optimizer-skill)";

/// Maximum accepted response size (10 MB)
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 10 * 1024 * 1024;

/// Longest accepted cache lifetime (100 years)
pub const MAX_CACHE_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Main configuration structure, loaded from `.geo-optimizer.toml`
///
/// Every section is optional; missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audit: AuditConfig,
    pub llms: LlmsConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,

    /// Additional bots to classify, name -> description
    #[serde(rename = "extra-bots")]
    pub extra_bots: BTreeMap<String, String>,
}

/// Audit defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Site to audit when no `--url` is given
    pub url: Option<String>,

    /// Report format
    pub format: OutputFormat,

    /// File to write the report to instead of stdout
    pub output: Option<PathBuf>,

    /// Minimum acceptable score; lower scores make the CLI exit with 1
    #[serde(rename = "min-score")]
    pub min_score: u32,

    /// Serve the homepage from the response cache when possible
    pub cache: bool,

    /// Run the extra checks (schema validation) after scoring
    #[serde(rename = "extra-checks")]
    pub extra_checks: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            url: None,
            format: OutputFormat::Text,
            output: None,
            min_score: 0,
            cache: false,
            extra_checks: true,
        }
    }
}

/// llms.txt generator defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmsConfig {
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    #[serde(rename = "site-name")]
    pub site_name: Option<String>,

    pub description: Option<String>,

    /// Cap on links per main section
    #[serde(rename = "max-per-section")]
    pub max_per_section: usize,

    /// Fetch page titles for entries without one
    #[serde(rename = "fetch-titles")]
    pub fetch_titles: bool,
}

impl Default for LlmsConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            site_name: None,
            description: None,
            max_per_section: 20,
            fetch_titles: false,
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Retries for transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Initial backoff between retries (milliseconds)
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,

    #[serde(rename = "max-response-bytes")]
    pub max_response_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            max_retries: 3,
            backoff_ms: 1000,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// Response cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// SQLite database path; defaults to `~/.geo-cache/cache.db`
    pub path: Option<PathBuf>,

    /// Entry lifetime (seconds)
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            ttl_secs: 3600,
        }
    }
}

impl CacheConfig {
    /// Resolves the database path, expanding a leading `~`
    pub fn resolved_path(&self) -> PathBuf {
        let home = std::env::var_os("HOME").map(PathBuf::from);

        match (&self.path, home) {
            (Some(path), Some(home)) => match path.strip_prefix("~") {
                Ok(rest) => home.join(rest),
                Err(_) => path.clone(),
            },
            (Some(path), None) => path.clone(),
            (None, Some(home)) => home.join(".geo-cache").join("cache.db"),
            (None, None) => PathBuf::from(".geo-cache").join("cache.db"),
        }
    }
}
