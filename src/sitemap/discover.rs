//! Sitemap discovery

use crate::fetch::Fetcher;
use crate::robots::ParsedRobots;
use crate::url::{ensure_public_url, resource_url, url_belongs_to_domain};
use url::Url;

/// Locations tried when robots.txt names no sitemap
pub const COMMON_SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/sitemaps/sitemap.xml",
    "/wp-sitemap.xml",
    "/sitemap-0.xml",
];

/// Finds the sitemap of a site
///
/// `Sitemap:` lines in robots.txt win; a candidate is only accepted if it
/// belongs to the site's domain and, unless `allow_private_hosts` is set,
/// points at a public host. Otherwise the common locations are checked with
/// HEAD in order and the first one answering 200 is returned.
pub async fn discover_sitemap(
    fetcher: &dyn Fetcher,
    base_url: &str,
    allow_private_hosts: bool,
) -> Option<String> {
    let domain = Url::parse(base_url).ok()?.host_str()?.to_string();

    if let Ok(robots_url) = resource_url(base_url, "/robots.txt") {
        match fetcher.get(&robots_url).await {
            Ok(response) if response.is_ok() => {
                let robots = ParsedRobots::parse(&response.body);
                for candidate in robots.sitemaps() {
                    if !url_belongs_to_domain(candidate, &domain) {
                        tracing::warn!("Ignoring off-domain sitemap in robots.txt: {}", candidate);
                        continue;
                    }
                    if !allow_private_hosts {
                        if let Err(e) = ensure_public_url(candidate).await {
                            tracing::warn!("Ignoring unsafe sitemap {}: {}", candidate, e);
                            continue;
                        }
                    }
                    tracing::info!("Sitemap found in robots.txt: {}", candidate);
                    return Some(candidate.to_string());
                }
            }
            Ok(response) => tracing::debug!("robots.txt returned HTTP {}", response.status),
            Err(e) => tracing::debug!("robots.txt fetch failed: {}", e),
        }
    }

    for path in COMMON_SITEMAP_PATHS {
        let Ok(candidate) = resource_url(base_url, path) else {
            continue;
        };
        match fetcher.head(&candidate).await {
            Ok(200) => {
                tracing::info!("Sitemap found: {}", candidate);
                return Some(candidate);
            }
            Ok(status) => tracing::debug!("{} returned HTTP {}", candidate, status),
            Err(e) => tracing::debug!("{} check failed: {}", candidate, e),
        }
    }

    None
}
