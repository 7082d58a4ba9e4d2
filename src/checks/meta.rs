//! Title, description, canonical and Open Graph tags

use scraper::{Html, Selector};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaResult {
    pub has_title: bool,
    pub has_description: bool,
    pub has_canonical: bool,
    pub has_og_title: bool,
    pub has_og_description: bool,
    pub has_og_image: bool,
    pub title_text: String,
    pub description_text: String,
    pub description_length: usize,
    pub title_length: usize,
    pub canonical_url: String,
}

/// Returns the `content` of the first element matching `selector`
fn first_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

/// Checks SEO and Open Graph meta tags
///
/// Only the first tag of each kind is considered. Lengths are counted in
/// characters, not bytes.
pub fn check_meta(document: &Html) -> MetaResult {
    let mut result = MetaResult::default();

    if let Ok(selector) = Selector::parse("title") {
        if let Some(title) = document.select(&selector).next() {
            let text = title.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                result.has_title = true;
                result.title_length = text.chars().count();
                result.title_text = text;
            }
        }
    }

    if let Some(content) = first_content(document, r#"meta[name="description"]"#) {
        let text = content.trim();
        if !text.is_empty() {
            result.has_description = true;
            result.description_length = text.chars().count();
            result.description_text = text.to_string();
        }
    }

    if let Ok(selector) = Selector::parse(r#"link[rel~="canonical"]"#) {
        if let Some(href) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("href"))
            .filter(|href| !href.is_empty())
        {
            result.has_canonical = true;
            result.canonical_url = href.to_string();
        }
    }

    let has_og = |property: &str| {
        first_content(document, &format!(r#"meta[property="{}"]"#, property))
            .map_or(false, |content| !content.is_empty())
    };
    result.has_og_title = has_og("og:title");
    result.has_og_description = has_og("og:description");
    result.has_og_image = has_og("og:image");

    result
}
