/// Checks if a host belongs to a domain
///
/// A host belongs to a domain when it is the domain itself or a proper
/// subdomain of it. Comparison is case-insensitive. Substring matches such as
/// `notexample.com` for `example.com` are rejected.
///
/// # Arguments
///
/// * `domain` - The reference domain (e.g., "example.com")
/// * `host` - The host to check
///
/// # Returns
///
/// * `true` - If `host` is `domain` or one of its subdomains
/// * `false` - Otherwise
///
/// # Examples
///
/// ```
/// use geo_optimizer::url::matches_domain;
///
/// assert!(matches_domain("example.com", "example.com"));
/// assert!(matches_domain("example.com", "blog.example.com"));
/// assert!(!matches_domain("example.com", "evil-example.com"));
/// ```
pub fn matches_domain(domain: &str, host: &str) -> bool {
    if domain.is_empty() {
        return false;
    }

    let domain = domain.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    host == domain || host.ends_with(&format!(".{}", domain))
}
