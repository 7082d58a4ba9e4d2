//! Sitemap-to-llms.txt generation
//!
//! This module handles:
//! - Discovering a site's sitemap (robots.txt, then common locations)
//! - Fetching and flattening nested sitemap indexes
//! - Filtering, categorizing and rendering the llms.txt document

mod discover;
mod fetch;
mod generator;
mod parse;

pub use discover::{discover_sitemap, COMMON_SITEMAP_PATHS};
pub use fetch::{fetch_sitemap, MAX_CHILD_SITEMAPS, MAX_SITEMAP_DEPTH};
pub use generator::{
    categorize_url, categorize_urls, default_description, default_site_name,
    extract_page_title, fetch_page_title, minimal_llms_txt, render_llms_txt, resolve_titles,
    should_skip, title_case, url_to_label, CategorizedUrls, GeneratorOptions, LlmsEntry,
    HOMEPAGE_CATEGORY, MAIN_PAGES_CATEGORY, OPTIONAL_CATEGORIES, OTHER_CATEGORY,
    SECTION_PRIORITY_ORDER,
};
pub use parse::{parse_sitemap, SitemapDocument, DEFAULT_PRIORITY};

use crate::fetch::Fetcher;
use serde::Serialize;
use thiserror::Error;

/// One page listed in a sitemap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapUrl {
    pub url: String,
    pub lastmod: Option<String>,

    /// In [0, 1]; [`DEFAULT_PRIORITY`] when the sitemap gives none
    pub priority: f64,

    pub title: Option<String>,
}

/// Errors of the llms.txt generator
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("No URLs found in sitemap {0}")]
    Empty(String),
}

/// How the document was produced
#[derive(Debug, Clone, PartialEq)]
pub enum LlmsSource {
    /// Built from this sitemap
    Sitemap { url: String, entries: usize },

    /// No sitemap was found; the minimal document was emitted
    Minimal,
}

/// A generated llms.txt document
#[derive(Debug, Clone)]
pub struct GeneratedLlms {
    pub content: String,
    pub source: LlmsSource,
}

/// Generates llms.txt for a site
///
/// # Arguments
///
/// * `fetcher` - HTTP access
/// * `base_url` - Normalized site base URL
/// * `sitemap_url` - Explicit sitemap; discovered when `None`
/// * `options` - Naming overrides and limits
///
/// # Returns
///
/// * `Ok(GeneratedLlms)` - The document; the minimal one when no sitemap exists
/// * `Err(SitemapError)` - The sitemap yielded no URLs
pub async fn generate_llms_txt(
    fetcher: &dyn Fetcher,
    base_url: &str,
    sitemap_url: Option<&str>,
    options: &GeneratorOptions,
) -> Result<GeneratedLlms, SitemapError> {
    let site_name = options
        .site_name
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_site_name(base_url));
    let description = options
        .description
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_description(&site_name, base_url));

    let sitemap_url = match sitemap_url {
        Some(url) => Some(url.to_string()),
        None => discover_sitemap(fetcher, base_url, options.allow_private_hosts).await,
    };

    let Some(sitemap_url) = sitemap_url else {
        tracing::warn!("No sitemap found for {}", base_url);
        return Ok(GeneratedLlms {
            content: minimal_llms_txt(&site_name, &description, base_url),
            source: LlmsSource::Minimal,
        });
    };

    let urls = fetch_sitemap(fetcher, &sitemap_url).await;
    if urls.is_empty() {
        return Err(SitemapError::Empty(sitemap_url));
    }
    tracing::info!("Total URLs: {}", urls.len());

    let mut categorized = categorize_urls(base_url, &urls);
    categorized.truncate(options.max_per_section);
    if options.fetch_titles {
        resolve_titles(fetcher, &mut categorized).await;
    }

    Ok(GeneratedLlms {
        content: render_llms_txt(
            &site_name,
            &description,
            &categorized,
            options.max_per_section,
        ),
        source: LlmsSource::Sitemap {
            url: sitemap_url,
            entries: urls.len(),
        },
    })
}
