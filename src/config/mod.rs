//! Configuration module
//!
//! Loads the optional `.geo-optimizer.toml` project file. Every section and
//! key is optional and command-line flags take precedence over it.
//!
//! # Example
//!
//! ```no_run
//! use geo_optimizer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new(".geo-optimizer.toml")).unwrap();
//! println!("Minimum score: {}", config.audit.min_score);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AuditConfig, CacheConfig, Config, HttpConfig, LlmsConfig, DEFAULT_MAX_RESPONSE_BYTES,
    DEFAULT_USER_AGENT, MAX_CACHE_TTL_SECS,
};

// Re-export parser functions
pub use parser::{find_config_file, load_config, load_project_config, CONFIG_FILE_NAME};
pub use validation::validate;
