//! Public-host guard
//!
//! Rejects URLs that would make the auditor reach into internal networks:
//! non-http(s) schemes, embedded credentials, well-known metadata hosts and
//! hosts that resolve to loopback, private or link-local addresses.

use crate::{UrlError, UrlResult};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Internal host names that are never fetched
pub const BLOCKED_HOSTNAMES: &[&str] = &[
    "localhost",
    "metadata",
    "metadata.google.internal",
    "169.254.169.254",
];

/// Verifies that a URL points to a public host
///
/// DNS resolution failures are not treated as a violation: the subsequent
/// fetch will fail on its own and be reported as unreachable.
///
/// # Arguments
///
/// * `url` - The URL to validate
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL, safe to fetch
/// * `Err(UrlError)` - The URL is malformed or targets a non-public host
pub async fn ensure_public_url(url: &str) -> UrlResult<Url> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(e.to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
    }

    let host = match parsed.host() {
        Some(host) => host.to_owned(),
        None => return Err(UrlError::MissingHost),
    };

    let host_name = match &host {
        Host::Domain(d) => d.to_lowercase(),
        Host::Ipv4(ip) => ip.to_string(),
        Host::Ipv6(ip) => ip.to_string(),
    };

    if BLOCKED_HOSTNAMES.contains(&host_name.as_str()) {
        return Err(UrlError::BlockedHost(host_name));
    }

    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(UrlError::Credentials);
    }

    let addrs: Vec<IpAddr> = match host {
        Host::Ipv4(ip) => vec![IpAddr::V4(ip)],
        Host::Ipv6(ip) => vec![IpAddr::V6(ip)],
        Host::Domain(domain) => match tokio::net::lookup_host((domain.as_str(), 0)).await {
            Ok(resolved) => resolved.map(|sa| sa.ip()).collect(),
            Err(e) => {
                tracing::debug!("DNS lookup failed for {}: {}", domain, e);
                return Ok(parsed);
            }
        },
    };

    for addr in addrs {
        if is_blocked_ip(addr) {
            return Err(UrlError::PrivateAddress {
                host: host_name,
                addr,
            });
        }
    }

    Ok(parsed)
}

/// Returns true for loopback, RFC 1918, link-local and IPv6 ULA addresses
pub fn is_blocked_ip(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => is_blocked_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_blocked_v4(v4),
            None => is_blocked_v6(v6),
        },
    }
}

fn is_blocked_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
}

fn is_blocked_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7
        || (first & 0xfe00) == 0xfc00
        // fe80::/10
        || (first & 0xffc0) == 0xfe80
}
