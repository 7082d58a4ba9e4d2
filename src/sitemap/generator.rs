//! llms.txt generation from sitemap entries
//!
//! The pipeline is: filter (domain, deny patterns) -> sort by priority ->
//! dedupe -> categorize -> cap per section -> resolve labels -> render.
//! Everything except optional title fetching is synchronous and pure.

use crate::fetch::Fetcher;
use crate::sitemap::SitemapUrl;
use crate::url::url_belongs_to_domain;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Category of the site root
pub const HOMEPAGE_CATEGORY: &str = "_homepage";

/// Category of unmatched single-segment paths
pub const MAIN_PAGES_CATEGORY: &str = "Main Pages";

/// Category of unmatched deeper paths
pub const OTHER_CATEGORY: &str = "Other";

/// Section order; categories not listed follow alphabetically
pub const SECTION_PRIORITY_ORDER: &[&str] = &[
    "Tools",
    "Calculators",
    "Finance Tools",
    "Health & Wellness",
    "Math",
    "Applications",
    "Main Pages",
    "Documentation",
    "Guides",
    "Tutorials",
    "Blog & Articles",
    "Articles",
    "Posts",
    "Products",
    "Services",
    "About",
    "Contact",
    "Other",
    "Privacy & Legal",
    "Terms",
];

/// Categories rendered in the trailing `## Optional` section
pub const OPTIONAL_CATEGORIES: &[&str] = &["Privacy & Legal", "Terms", "Contact", "Other"];

/// Links per category in the `## Optional` section
pub const MAX_OPTIONAL_PER_CATEGORY: usize = 5;

static SKIP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/wp-",
        r"/admin",
        r"/login",
        r"/logout",
        r"/register",
        r"/cart",
        r"/checkout",
        r"/account",
        r"/user/",
        r"\.(xml|json|rss|atom|pdf|jpg|png|css|js)$",
        r"/tag/",
        r"/category/\w+/page/",
        r"/page/\d+",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid skip pattern"))
    .collect()
});

static CATEGORY_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"/blog/", "Blog & Articles"),
        (r"/article", "Articles"),
        (r"/post/", "Posts"),
        (r"/finance/", "Finance Tools"),
        (r"/health/", "Health & Wellness"),
        (r"/math/", "Math"),
        (r"/calcul", "Calculators"),
        (r"/tool", "Tools"),
        (r"/app/", "Applications"),
        (r"/docs?/", "Documentation"),
        (r"/guide/", "Guides"),
        (r"/tutorial", "Tutorials"),
        (r"/product", "Products"),
        (r"/service", "Services"),
        (r"/about", "About"),
        (r"/contact", "Contact"),
        (r"/privacy", "Privacy & Legal"),
        (r"/terms", "Terms"),
    ]
    .iter()
    .map(|(p, category)| {
        (
            Regex::new(&format!("(?i){}", p)).expect("valid category pattern"),
            *category,
        )
    })
    .collect()
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid selector"));
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("valid selector"));

/// Generator settings
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Header name; derived from the host when absent
    pub site_name: Option<String>,

    /// Blockquote text; derived from the name and base URL when absent
    pub description: Option<String>,

    /// Fetch `<title>` of pages that have no sitemap title (one request per link)
    pub fetch_titles: bool,

    /// Link cap per regular section
    pub max_per_section: usize,

    /// Accept `Sitemap:` URLs on private hosts during discovery
    pub allow_private_hosts: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            site_name: None,
            description: None,
            fetch_titles: false,
            max_per_section: 20,
            allow_private_hosts: false,
        }
    }
}

/// A link selected for the document
#[derive(Debug, Clone, PartialEq)]
pub struct LlmsEntry {
    pub url: String,
    pub label: Option<String>,
    pub priority: f64,
}

/// Links grouped by category, each group in priority order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedUrls {
    groups: HashMap<String, Vec<LlmsEntry>>,
}

impl CategorizedUrls {
    pub fn get(&self, category: &str) -> Option<&[LlmsEntry]> {
        self.groups.get(category).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Category names in rendering order, homepage excluded
    pub fn section_order(&self) -> Vec<&str> {
        let mut ordered: Vec<&str> = SECTION_PRIORITY_ORDER
            .iter()
            .copied()
            .filter(|c| self.groups.contains_key(*c))
            .collect();

        let mut remaining: Vec<&str> = self
            .groups
            .keys()
            .map(String::as_str)
            .filter(|c| *c != HOMEPAGE_CATEGORY && !SECTION_PRIORITY_ORDER.contains(c))
            .collect();
        remaining.sort_unstable();

        ordered.extend(remaining);
        ordered
    }

    /// Drops entries that would not be rendered anyway
    pub fn truncate(&mut self, max_per_section: usize) {
        for (category, entries) in self.groups.iter_mut() {
            let cap = if category == HOMEPAGE_CATEGORY {
                1
            } else if OPTIONAL_CATEGORIES.contains(&category.as_str()) {
                MAX_OPTIONAL_PER_CATEGORY
            } else {
                max_per_section
            };
            entries.truncate(cap);
        }
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = &mut LlmsEntry> {
        self.groups.values_mut().flatten()
    }
}

/// Returns true when a URL matches a deny pattern (case-insensitive)
pub fn should_skip(url: &str) -> bool {
    SKIP_PATTERNS.iter().any(|p| p.is_match(url))
}

/// Assigns a category from the URL path
pub fn categorize_url(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_lowercase())
        .unwrap_or_default();

    if let Some((_, category)) = CATEGORY_PATTERNS.iter().find(|(p, _)| p.is_match(&path)) {
        return category.to_string();
    }

    if path.is_empty() || path == "/" {
        return HOMEPAGE_CATEGORY.to_string();
    }

    if path.split('/').filter(|s| !s.is_empty()).count() == 1 {
        MAIN_PAGES_CATEGORY.to_string()
    } else {
        OTHER_CATEGORY.to_string()
    }
}

/// Capitalizes the first letter of every word and lowercases the rest
///
/// A word is a run of letters; digits and punctuation separate words, so
/// `"3d-print"` becomes `"3D-Print"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn slug_to_words(slug: &str) -> String {
    title_case(&slug.replace(['-', '_'], " "))
}

/// Builds a readable label from the URL path
///
/// # Examples
///
/// ```
/// use geo_optimizer::sitemap::url_to_label;
///
/// assert_eq!(url_to_label("https://example.com/"), "Homepage");
/// assert_eq!(url_to_label("https://example.com/blog/my-first_post/"), "My First Post");
/// assert_eq!(url_to_label("https://example.com/news/2024"), "News/2024");
/// ```
pub fn url_to_label(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();
    let path = path.trim_matches('/');
    if path.is_empty() {
        return "Homepage".to_string();
    }

    let parts: Vec<&str> = path.split('/').collect();
    let label = slug_to_words(parts[parts.len() - 1]);

    if !label.is_empty() && label.chars().all(char::is_numeric) {
        let tail = &parts[parts.len().saturating_sub(2)..];
        return slug_to_words(&tail.join("/"));
    }

    if label.is_empty() {
        path.to_string()
    } else {
        label
    }
}

/// Default site name: first host label without `www.`, title-cased
pub fn default_site_name(base_url: &str) -> String {
    let host = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    let host = host.replace("www.", "");
    title_case(host.split('.').next().unwrap_or_default())
}

/// Default blockquote description
pub fn default_description(site_name: &str, base_url: &str) -> String {
    format!("Website {} available at {}", site_name, base_url)
}

/// Selects, orders and categorizes sitemap entries for a site
///
/// Relative URLs are resolved against `base_url`. Entries off the site's
/// domain (host without port; subdomains included) or matching a deny
/// pattern are dropped. Entries are sorted by descending priority (ties keep
/// sitemap order) and the first occurrence of each URL wins.
pub fn categorize_urls(base_url: &str, urls: &[SitemapUrl]) -> CategorizedUrls {
    let base = Url::parse(base_url).ok();
    let domain = base
        .as_ref()
        .and_then(|u| u.host_str())
        .unwrap_or_default()
        .to_string();

    let mut sorted: Vec<&SitemapUrl> = urls.iter().collect();
    sorted.sort_by(|a, b| b.priority.total_cmp(&a.priority));

    let mut seen = std::collections::HashSet::new();
    let mut categorized = CategorizedUrls::default();

    for entry in sorted {
        let url = if entry.url.starts_with("http") {
            entry.url.clone()
        } else {
            match base.as_ref().and_then(|b| b.join(&entry.url).ok()) {
                Some(joined) => joined.to_string(),
                None => continue,
            }
        };

        if !url_belongs_to_domain(&url, &domain) || should_skip(&url) {
            continue;
        }
        if !seen.insert(url.clone()) {
            continue;
        }

        categorized
            .groups
            .entry(categorize_url(&url))
            .or_default()
            .push(LlmsEntry {
                url,
                label: entry.title.clone(),
                priority: entry.priority,
            });
    }

    categorized
}

/// Extracts a page title: `<title>`, else the first `<h1>`
pub fn extract_page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    [&*TITLE_SELECTOR, &*H1_SELECTOR].iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    })
}

/// Fetches a page title; error pages and failures yield `None`
pub async fn fetch_page_title(fetcher: &dyn Fetcher, url: &str) -> Option<String> {
    match fetcher.get(url).await {
        Ok(response) if response.is_ok() => {
            extract_page_title(&response.body).filter(|t| !t.is_empty())
        }
        Ok(response) => {
            tracing::debug!("No title for {}: HTTP {}", url, response.status);
            None
        }
        Err(e) => {
            tracing::debug!("No title for {}: {}", url, e);
            None
        }
    }
}

/// Fills missing labels from page titles
pub async fn resolve_titles(fetcher: &dyn Fetcher, categorized: &mut CategorizedUrls) {
    for entry in categorized.entries_mut() {
        if entry.label.is_none() {
            entry.label = fetch_page_title(fetcher, &entry.url).await;
        }
    }
}

/// Renders the llms.txt document
pub fn render_llms_txt(
    site_name: &str,
    description: &str,
    categorized: &CategorizedUrls,
    max_per_section: usize,
) -> String {
    let mut lines: Vec<String> = vec![
        format!("# {}", site_name),
        String::new(),
        format!("> {}", description),
        String::new(),
        String::new(),
    ];

    if let Some(home) = categorized.get(HOMEPAGE_CATEGORY).and_then(|h| h.first()) {
        lines.push(format!(
            "The main homepage is available at: [{}]({})",
            site_name, home.url
        ));
        lines.push(String::new());
    }

    let (optional, main): (Vec<&str>, Vec<&str>) = categorized
        .section_order()
        .into_iter()
        .partition(|c| OPTIONAL_CATEGORIES.contains(c));

    for category in main {
        let entries = categorized.get(category).unwrap_or_default();
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("## {}", category));
        lines.push(String::new());
        for entry in entries.iter().take(max_per_section) {
            lines.push(format!("- [{}]({})", label_of(entry), entry.url));
        }
        lines.push(String::new());
    }

    if !optional.is_empty() {
        lines.push("## Optional".to_string());
        lines.push(String::new());
        for category in optional {
            let entries = categorized.get(category).unwrap_or_default();
            for entry in entries.iter().take(MAX_OPTIONAL_PER_CATEGORY) {
                lines.push(format!("- [{}]({}): {}", label_of(entry), entry.url, category));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn label_of(entry: &LlmsEntry) -> String {
    match &entry.label {
        Some(label) if !label.is_empty() => label.clone(),
        _ => url_to_label(&entry.url),
    }
}

/// Document emitted when a site has no discoverable sitemap
pub fn minimal_llms_txt(site_name: &str, description: &str, base_url: &str) -> String {
    format!(
        "# {}\n\n> {}\n\n## Main Pages\n\n- [Homepage]({})\n",
        site_name, description, base_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, priority: f64) -> SitemapUrl {
        SitemapUrl {
            url: url.to_string(),
            lastmod: None,
            priority,
            title: None,
        }
    }

    #[test]
    fn test_should_skip() {
        assert!(should_skip("https://e.com/wp-admin/"));
        assert!(should_skip("https://e.com/ADMIN/users"));
        assert!(should_skip("https://e.com/feed.XML"));
        assert!(should_skip("https://e.com/blog/page/2"));
        assert!(should_skip("https://e.com/category/news/page/3"));
        assert!(should_skip("https://e.com/tag/rust/"));
        assert!(!should_skip("https://e.com/blog/hello"));
        assert!(!should_skip("https://e.com/about"));
    }

    #[test]
    fn test_categorize_url() {
        assert_eq!(categorize_url("https://e.com/"), HOMEPAGE_CATEGORY);
        assert_eq!(categorize_url("https://e.com"), HOMEPAGE_CATEGORY);
        assert_eq!(categorize_url("https://e.com/pricing"), MAIN_PAGES_CATEGORY);
        assert_eq!(categorize_url("https://e.com/a/b"), OTHER_CATEGORY);
        assert_eq!(categorize_url("https://e.com/Blog/post-1"), "Blog & Articles");
        assert_eq!(categorize_url("https://e.com/doc/intro"), "Documentation");
        assert_eq!(categorize_url("https://e.com/docs/intro"), "Documentation");
        assert_eq!(categorize_url("https://e.com/tools/calculator"), "Calculators");
        assert_eq!(categorize_url("https://e.com/about"), "About");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case("HELLO wORLD"), "Hello World");
        assert_eq!(title_case("3d-print"), "3D-Print");
        assert_eq!(title_case("it's"), "It'S");
    }

    #[test]
    fn test_url_to_label() {
        assert_eq!(url_to_label("https://e.com"), "Homepage");
        assert_eq!(url_to_label("https://e.com/pricing-plans"), "Pricing Plans");
        assert_eq!(url_to_label("https://e.com/blog/2024/05"), "2024/05");
        assert_eq!(url_to_label("https://e.com/issue/42/"), "Issue/42");
    }

    #[test]
    fn test_default_site_name() {
        assert_eq!(default_site_name("https://www.my-site.co.uk"), "My-Site");
        assert_eq!(default_site_name("https://example.com:8443"), "Example");
        assert_eq!(
            default_description("Example", "https://example.com"),
            "Website Example available at https://example.com"
        );
    }

    #[test]
    fn test_categorize_urls_filters_sorts_dedupes() {
        let urls = vec![
            entry("https://e.com/blog/low", 0.1),
            entry("https://e.com/blog/high", 0.9),
            entry("https://e.com/blog/high", 0.2),
            entry("https://evil-e.com/blog/x", 1.0),
            entry("https://docs.e.com/guide/start", 0.5),
            entry("/relative", 0.5),
            entry("https://e.com/login", 1.0),
        ];

        let categorized = categorize_urls("https://e.com", &urls);
        let blog: Vec<&str> = categorized
            .get("Blog & Articles")
            .unwrap()
            .iter()
            .map(|e| e.url.as_str())
            .collect();

        assert_eq!(blog, vec!["https://e.com/blog/high", "https://e.com/blog/low"]);
        assert_eq!(categorized.get("Guides").unwrap()[0].url, "https://docs.e.com/guide/start");
        assert_eq!(categorized.get(MAIN_PAGES_CATEGORY).unwrap()[0].url, "https://e.com/relative");
        assert_eq!(categorized.len(), 4);
    }

    #[test]
    fn test_section_order() {
        let urls = vec![
            entry("https://e.com/zebra/a", 0.5),
            entry("https://e.com/blog/a", 0.5),
            entry("https://e.com/tools/a", 0.5),
            entry("https://e.com/", 0.5),
            entry("https://e.com/privacy", 0.5),
        ];
        let categorized = categorize_urls("https://e.com", &urls);
        assert_eq!(
            categorized.section_order(),
            vec!["Tools", "Blog & Articles", "Other", "Privacy & Legal"]
        );
    }

    #[test]
    fn test_render() {
        let mut urls = vec![
            entry("https://e.com/", 1.0),
            entry("https://e.com/tools/converter", 0.8),
            entry("https://e.com/pricing", 0.6),
            entry("https://e.com/privacy-policy", 0.1),
            entry("https://e.com/contact", 0.1),
        ];
        urls[1].title = Some("Unit Converter".to_string());

        let categorized = categorize_urls("https://e.com", &urls);
        let doc = render_llms_txt("Example", "An example", &categorized, 20);

        let expected = "# Example\n\
\n\
> An example\n\
\n\
\n\
The main homepage is available at: [Example](https://e.com/)\n\
\n\
## Tools\n\
\n\
- [Unit Converter](https://e.com/tools/converter)\n\
\n\
## Main Pages\n\
\n\
- [Pricing](https://e.com/pricing)\n\
\n\
## Optional\n\
\n\
- [Contact](https://e.com/contact): Contact\n\
- [Privacy Policy](https://e.com/privacy-policy): Privacy & Legal\n";

        assert_eq!(doc, expected);
    }

    #[test]
    fn test_render_caps_sections() {
        let urls: Vec<SitemapUrl> = (0..30)
            .map(|i| entry(&format!("https://e.com/blog/p{}", i), 0.5))
            .chain((0..8).map(|i| entry(&format!("https://e.com/a/b{}", i), 0.5)))
            .collect();
        let categorized = categorize_urls("https://e.com", &urls);
        let doc = render_llms_txt("E", "d", &categorized, 3);

        assert_eq!(doc.matches("](https://e.com/blog/").count(), 3);
        assert_eq!(doc.matches("): Other").count(), 5);
        assert!(doc.contains("- [P0](https://e.com/blog/p0)"));
    }

    #[test]
    fn test_truncate_matches_render_caps() {
        let urls: Vec<SitemapUrl> = (0..10)
            .map(|i| entry(&format!("https://e.com/blog/p{}", i), 0.5))
            .chain((0..10).map(|i| entry(&format!("https://e.com/terms/v{}", i), 0.5)))
            .collect();
        let mut categorized = categorize_urls("https://e.com", &urls);
        let before = render_llms_txt("E", "d", &categorized, 4);

        categorized.truncate(4);
        assert_eq!(categorized.len(), 9);
        assert_eq!(render_llms_txt("E", "d", &categorized, 4), before);
    }

    #[test]
    fn test_extract_page_title() {
        assert_eq!(
            extract_page_title("<html><head><title> Hi </title></head></html>").as_deref(),
            Some("Hi")
        );
        assert_eq!(
            extract_page_title("<html><body><h1>Heading</h1></body></html>").as_deref(),
            Some("Heading")
        );
        assert!(extract_page_title("<p>none</p>").is_none());
    }

    #[test]
    fn test_minimal() {
        assert_eq!(
            minimal_llms_txt("Example", "Desc", "https://e.com"),
            "# Example\n\n> Desc\n\n## Main Pages\n\n- [Homepage](https://e.com)\n"
        );
    }
}
