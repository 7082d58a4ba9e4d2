use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a user-supplied site address into an audit base URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Prepend `https://` when no http(s) scheme is present
/// 3. Strip trailing slashes
/// 4. Parse the result; reject non-http(s) schemes and missing hosts
///
/// # Arguments
///
/// * `input` - The address as typed by the user (e.g., "example.com/")
///
/// # Returns
///
/// * `Ok(String)` - Base URL without trailing slash
/// * `Err(UrlError)` - The address cannot be turned into an http(s) URL
///
/// # Examples
///
/// ```
/// use geo_optimizer::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("example.com/").unwrap(), "https://example.com");
/// assert_eq!(normalize_base_url("http://example.com").unwrap(), "http://example.com");
/// ```
pub fn normalize_base_url(input: &str) -> UrlResult<String> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        let scheme = trimmed.split("://").next().unwrap_or_default();
        return Err(UrlError::InvalidScheme(scheme.to_string()));
    } else {
        format!("https://{}", trimmed)
    };

    let base = with_scheme.trim_end_matches('/').to_string();

    let parsed = Url::parse(&base).map_err(|e| UrlError::Parse(e.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(base)
}

/// Resolves a site-absolute resource path (e.g. "/robots.txt") against a base URL
///
/// Follows URL-join semantics, so an absolute path always lands on the
/// origin root even when the base URL itself carries a path.
pub fn resource_url(base_url: &str, path: &str) -> UrlResult<String> {
    let base = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;
    let joined = base.join(path).map_err(|e| UrlError::Parse(e.to_string()))?;
    Ok(joined.to_string())
}
