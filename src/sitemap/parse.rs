//! XML sitemap parsing

use crate::sitemap::SitemapUrl;
use serde::Deserialize;
use url::Url;

/// Priority assumed for entries without a valid `<priority>`
pub const DEFAULT_PRIORITY: f64 = 0.5;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    /// A `<sitemapindex>` listing child sitemaps, in document order
    Index(Vec<String>),

    /// A `<urlset>` listing pages
    UrlSet(Vec<SitemapUrl>),
}

impl SitemapDocument {
    fn empty() -> Self {
        SitemapDocument::UrlSet(Vec::new())
    }
}

// Both root kinds share one shape: unknown elements (changefreq, image:image,
// xhtml:link...) are ignored by serde.
#[derive(Debug, Default, Deserialize)]
struct RawSitemap {
    #[serde(rename = "sitemap", default)]
    sitemaps: Vec<RawLoc>,

    #[serde(rename = "url", default)]
    urls: Vec<RawUrl>,
}

#[derive(Debug, Deserialize)]
struct RawLoc {
    loc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUrl {
    loc: Option<String>,
    lastmod: Option<String>,
    priority: Option<String>,
}

/// Parses sitemap XML fetched from `sitemap_url`
///
/// Relative `<loc>` values are resolved against `sitemap_url`. Entries without
/// a `<loc>` are skipped. A document that is not valid XML yields an empty
/// url set.
pub fn parse_sitemap(xml: &str, sitemap_url: &str) -> SitemapDocument {
    let raw: RawSitemap = match quick_xml::de::from_str(xml) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Invalid sitemap XML at {}: {}", sitemap_url, e);
            return SitemapDocument::empty();
        }
    };

    let base = Url::parse(sitemap_url).ok();

    if !raw.sitemaps.is_empty() {
        let children = raw
            .sitemaps
            .into_iter()
            .filter_map(|entry| entry.loc)
            .map(|loc| resolve(base.as_ref(), &loc))
            .collect();
        return SitemapDocument::Index(children);
    }

    let urls = raw
        .urls
        .into_iter()
        .filter_map(|entry| {
            let loc = entry.loc?;
            Some(SitemapUrl {
                url: resolve(base.as_ref(), &loc),
                lastmod: entry
                    .lastmod
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                priority: entry
                    .priority
                    .and_then(|p| p.trim().parse::<f64>().ok())
                    .unwrap_or(DEFAULT_PRIORITY),
                title: None,
            })
        })
        .collect();

    SitemapDocument::UrlSet(urls)
}

fn resolve(base: Option<&Url>, loc: &str) -> String {
    let loc = loc.trim();
    match base.and_then(|b| b.join(loc).ok()) {
        Some(url) => url.to_string(),
        None => loc.to_string(),
    }
}
