//! Sitemap download with bounded index expansion

use crate::fetch::Fetcher;
use crate::sitemap::parse::{parse_sitemap, SitemapDocument};
use crate::sitemap::SitemapUrl;
use std::collections::HashSet;

/// Index nesting deeper than this is not followed
pub const MAX_SITEMAP_DEPTH: usize = 3;

/// Child sitemaps followed per index
pub const MAX_CHILD_SITEMAPS: usize = 10;

/// Downloads a sitemap and flattens nested sitemap indexes into page entries
///
/// Entries come out in document order, children of an index in the order the
/// index lists them. Sitemaps at depth [`MAX_SITEMAP_DEPTH`] and beyond are
/// skipped, each index contributes at most [`MAX_CHILD_SITEMAPS`] children,
/// and a sitemap is never fetched twice, so self-referencing indexes
/// terminate. Fetch failures and non-200 responses contribute no entries.
pub async fn fetch_sitemap(fetcher: &dyn Fetcher, sitemap_url: &str) -> Vec<SitemapUrl> {
    let mut urls = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    // Depth-first, children pushed in reverse to keep document order
    let mut pending: Vec<(String, usize)> = vec![(sitemap_url.to_string(), 0)];

    while let Some((url, depth)) = pending.pop() {
        if depth >= MAX_SITEMAP_DEPTH {
            tracing::warn!("Max sitemap depth reached ({}), skipping: {}", depth, url);
            continue;
        }
        if !visited.insert(url.clone()) {
            tracing::debug!("Sitemap already fetched, skipping: {}", url);
            continue;
        }

        tracing::info!("Fetching sitemap: {}", url);
        let response = match fetcher.get(&url).await {
            Ok(response) if response.is_ok() => response,
            Ok(response) => {
                tracing::warn!("Sitemap {} returned HTTP {}", url, response.status);
                continue;
            }
            Err(e) => {
                tracing::warn!("Sitemap error: {}", e);
                continue;
            }
        };

        match parse_sitemap(&response.body, &url) {
            SitemapDocument::Index(children) => {
                tracing::info!("Sitemap index found: {} sitemaps", children.len());
                for child in children.into_iter().take(MAX_CHILD_SITEMAPS).rev() {
                    pending.push((child, depth + 1));
                }
            }
            SitemapDocument::UrlSet(entries) => {
                tracing::info!("URLs found: {}", entries.len());
                urls.extend(entries);
            }
        }
    }

    urls
}
