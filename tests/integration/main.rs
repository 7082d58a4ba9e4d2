//! Integration tests
//!
//! These tests use wiremock to stand up a fake website and run the auditor
//! and the llms.txt generator end-to-end over real HTTP.

mod audit_tests;
mod llms_tests;

use geo_optimizer::config::HttpConfig;

/// HTTP settings for tests: no retries, short timeout
pub fn test_http_config() -> HttpConfig {
    HttpConfig {
        timeout_secs: 5,
        max_retries: 0,
        backoff_ms: 10,
        ..HttpConfig::default()
    }
}
