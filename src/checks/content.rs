//! Content quality heuristics: headings, statistics, citations

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

/// Percentages and currency amounts, decimals, and integers of 3+ digits
pub const NUMBER_PATTERN: &str = r"\b\d+[%€$£]|\b\d+\.\d+|\b\d{3,}\b";

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NUMBER_PATTERN).expect("valid number regex"));

/// Minimum numeric tokens for the page to count as data-rich
const MIN_NUMBERS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentResult {
    pub has_h1: bool,
    pub heading_count: usize,
    pub has_numbers: bool,
    pub has_links: bool,
    pub word_count: usize,
    pub h1_text: String,
    pub numbers_count: usize,
    pub external_links_count: usize,
}

/// Returns true when `href` points outside `site_host`
///
/// Only absolute `http(s)` links qualify. A link counts as internal when its
/// host contains the site host, which also covers subdomains.
fn is_external(href: &str, site_host: &str) -> bool {
    if !href.starts_with("http") {
        return false;
    }
    if site_host.is_empty() {
        return true;
    }

    match Url::parse(href).ok().and_then(|u| u.host_str().map(str::to_lowercase)) {
        Some(host) => !host.contains(site_host),
        None => !href.to_lowercase().contains(site_host),
    }
}

/// Scores the homepage copy
///
/// # Arguments
///
/// * `document` - The parsed homepage
/// * `base_url` - The audited base URL, used to tell external links apart
pub fn check_content(document: &Html, base_url: &str) -> ContentResult {
    let mut result = ContentResult::default();

    if let Ok(selector) = Selector::parse("h1") {
        if let Some(h1) = document.select(&selector).next() {
            result.has_h1 = true;
            result.h1_text = h1.text().collect::<String>().trim().to_string();
        }
    }

    if let Ok(selector) = Selector::parse("h1, h2, h3, h4") {
        result.heading_count = document.select(&selector).count();
    }

    let text = document.root_element().text().collect::<String>();
    result.numbers_count = NUMBER_RE.find_iter(&text).count();
    result.has_numbers = result.numbers_count >= MIN_NUMBERS;
    result.word_count = text.split_whitespace().count();

    let site_host = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default();

    if let Ok(selector) = Selector::parse("a[href]") {
        result.external_links_count = document
            .select(&selector)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| is_external(href, &site_host))
            .count();
    }
    result.has_links = result.external_links_count > 0;

    result
}
