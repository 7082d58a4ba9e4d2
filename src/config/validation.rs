use crate::config::types::{
    AuditConfig, CacheConfig, Config, HttpConfig, LlmsConfig, MAX_CACHE_TTL_SECS,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_audit_config(&config.audit)?;
    validate_llms_config(&config.llms)?;
    validate_http_config(&config.http)?;
    validate_cache_config(&config.cache)?;
    validate_extra_bots(config)?;
    Ok(())
}

fn validate_audit_config(config: &AuditConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.url {
        validate_site_url("audit.url", url)?;
    }

    if config.min_score > 100 {
        return Err(ConfigError::Validation(format!(
            "min-score must be between 0 and 100, got {}",
            config.min_score
        )));
    }

    Ok(())
}

fn validate_llms_config(config: &LlmsConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.base_url {
        validate_site_url("llms.base-url", url)?;
    }

    if config.max_per_section < 1 {
        return Err(ConfigError::Validation(
            "max-per-section must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.max_response_bytes < 1024 {
        return Err(ConfigError::Validation(format!(
            "max-response-bytes must be >= 1024, got {}",
            config.max_response_bytes
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.ttl_secs == 0 {
        return Err(ConfigError::Validation(
            "cache ttl-secs must be >= 1".to_string(),
        ));
    }
    if config.ttl_secs > MAX_CACHE_TTL_SECS {
        return Err(ConfigError::Validation(format!(
            "cache ttl-secs must be <= {}, got {}",
            MAX_CACHE_TTL_SECS, config.ttl_secs
        )));
    }
    Ok(())
}

fn validate_extra_bots(config: &Config) -> Result<(), ConfigError> {
    for name in config.extra_bots.keys() {
        if name.trim().is_empty() || name.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "extra bot name '{}' must be a single non-empty token",
                name
            )));
        }
    }
    Ok(())
}

/// Site URLs may omit the scheme; they are normalized later
fn validate_site_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let candidate = if value.contains("://") {
        value.to_string()
    } else {
        format!("https://{}", value)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}
