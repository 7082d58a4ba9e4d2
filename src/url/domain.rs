use crate::url::matcher::matches_domain;
use url::Url;

/// Extracts the lowercase host from a URL, without the port
///
/// # Examples
///
/// ```
/// use url::Url;
/// use geo_optimizer::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8443/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks that a URL belongs to a domain without substring matching
///
/// URLs carrying embedded credentials (`user:pass@host`) never belong to any
/// domain, since they are a classic way to disguise the real target host.
///
/// # Arguments
///
/// * `url` - The full URL to check
/// * `domain` - The reference domain (e.g., "example.com")
///
/// # Returns
///
/// * `true` - If the URL's host is the domain or a subdomain of it
/// * `false` - If it is not, or the URL cannot be parsed
pub fn url_belongs_to_domain(url: &str, domain: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if !parsed.username().is_empty() || parsed.password().is_some() {
        return false;
    }

    match extract_domain(&parsed) {
        Some(host) => matches_domain(domain, &host),
        None => false,
    }
}
