//! End-to-end audits against a mock site

use crate::test_http_config;
use geo_optimizer::audit::Auditor;
use geo_optimizer::config::Config;
use geo_optimizer::output::{format_audit, OutputFormat};
use geo_optimizer::storage::{open_cache, ResponseCache};
use geo_optimizer::ScoreBand;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPTIMIZED_HOMEPAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Acme Calculators</title>
  <meta name="description" content="Free online calculators for finance, health and math.">
  <link rel="canonical" href="https://acme.example/">
  <meta property="og:title" content="Acme Calculators">
  <meta property="og:description" content="Free online calculators">
  <script type="application/ld+json">
  {"@context": "https://schema.org", "@type": "WebSite", "name": "Acme", "url": "https://acme.example"}
  </script>
  <script type="application/ld+json">
  [{"@context": "https://schema.org", "@type": "FAQPage", "mainEntity": []},
   {"@context": "https://schema.org", "@type": "WebApplication", "name": "Acme", "url": "https://acme.example"}]
  </script>
</head>
<body>
  <h1>Acme Calculators</h1>
  <h2>Finance</h2>
  <p>Over 1200 users saved 35% on loans in 2024, with average savings of 450.75 dollars.</p>
  <p>Source: <a href="https://en.wikipedia.org/wiki/Loan">Wikipedia</a></p>
</body>
</html>"#;

const LLMS_TXT: &str = "# Acme\n\n> Calculators\n\n## Tools\n\n- [Loan](https://acme.example/loan)\n";

async fn mount(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

fn auditor() -> Auditor {
    let config = Config {
        http: test_http_config(),
        ..Config::default()
    };
    Auditor::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_fully_optimized_site_scores_100() {
    let server = MockServer::start().await;
    mount(&server, "/", 200, OPTIMIZED_HOMEPAGE).await;
    mount(&server, "/robots.txt", 200, "User-agent: *\nAllow: /\n").await;
    mount(&server, "/llms.txt", 200, LLMS_TXT).await;

    let result = auditor().run(&server.uri()).await.unwrap();

    assert_eq!(result.breakdown.robots, 20);
    assert_eq!(result.breakdown.llms, 20);
    assert_eq!(result.breakdown.schema, 25);
    assert_eq!(result.breakdown.meta, 20);
    assert_eq!(result.breakdown.content, 15);
    assert_eq!(result.score, 100);
    assert_eq!(result.band, ScoreBand::Excellent);
    assert!(result.recommendations.is_empty());

    // schema validation runs by default and all three objects are valid
    assert_eq!(result.extra_checks.len(), 1);
    assert!(result.extra_checks[0].passed);
}

#[tokio::test]
async fn test_missing_robots_and_llms() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/",
        200,
        "<html><head><title>Bare</title></head><body><h1>Hi</h1></body></html>",
    )
    .await;

    let result = auditor().run(&server.uri()).await.unwrap();

    assert!(!result.robots.found);
    assert!(result.robots.bots_missing.is_empty());
    assert!(!result.llms.found);
    assert_eq!(result.score, 9);
    assert_eq!(result.band, ScoreBand::Critical);
    assert_eq!(
        result.recommendations[1],
        format!("Create /llms.txt: geo llms --base-url {}", server.uri())
    );

    let github = format_audit(&result, OutputFormat::Github).unwrap();
    assert!(github.starts_with("::error::GEO Score: 9/100 (CRITICAL)"));
}

#[tokio::test]
async fn test_partially_optimized_site_lands_in_good_band() {
    let description = "Independent guides to personal finance, budgeting and saving, written by certified planners and refreshed each month for readers across the world now.";
    let homepage = format!(
        r#"<html>
<head>
  <title>Acme Guides</title>
  <meta name="description" content="{}">
  <script type="application/ld+json">
  {{"@context": "https://schema.org", "@type": "WebSite", "name": "Acme", "url": "https://acme.example"}}
  </script>
</head>
<body>
  <h1>Acme Guides</h1>
  <p>Rates fell 12% in 2023 to 4.5 points.</p>
  <p>See <a href="https://en.wikipedia.org/wiki/Budget">the background</a>.</p>
</body>
</html>"#,
        description
    );

    let server = MockServer::start().await;
    mount(&server, "/", 200, &homepage).await;
    mount(
        &server,
        "/robots.txt",
        200,
        "User-agent: GPTBot\nAllow: /\n\nUser-agent: ClaudeBot\nAllow: /\n",
    )
    .await;
    mount(&server, "/llms.txt", 200, LLMS_TXT).await;

    let result = auditor().run(&server.uri()).await.unwrap();

    assert_eq!(result.meta.description_length, 150);
    assert_eq!(result.content.numbers_count, 3);
    assert_eq!(result.content.external_links_count, 1);
    assert_eq!(result.robots.bots_allowed, vec!["GPTBot", "ClaudeBot"]);

    // 13 robots + 20 llms + 10 schema + 13 meta + 15 content
    assert_eq!(result.breakdown.robots, 13);
    assert_eq!(result.breakdown.llms, 20);
    assert_eq!(result.breakdown.schema, 10);
    assert_eq!(result.breakdown.meta, 13);
    assert_eq!(result.breakdown.content, 15);
    assert_eq!(result.score, 71);
    assert_eq!(result.band, ScoreBand::Good);
    assert_eq!(
        result.recommendations,
        vec![
            "Update robots.txt to allow all AI citation bots (OAI-SearchBot, ClaudeBot, PerplexityBot)",
            "Add FAQPage schema with frequently asked questions",
        ]
    );
}

#[tokio::test]
async fn test_bare_site_scores_zero_with_every_recommendation() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/",
        200,
        "<html><head></head><body><p>Welcome to our small shop.</p></body></html>",
    )
    .await;
    mount(&server, "/robots.txt", 404, "Not Found").await;
    mount(&server, "/llms.txt", 404, "Not Found").await;

    let result = auditor().run(&server.uri()).await.unwrap();

    assert_eq!(result.score, 0);
    assert_eq!(result.band, ScoreBand::Critical);
    assert_eq!(
        result.recommendations,
        vec![
            "Update robots.txt to allow all AI citation bots (OAI-SearchBot, ClaudeBot, PerplexityBot)".to_string(),
            format!("Create /llms.txt: geo llms --base-url {}", server.uri()),
            "Add WebSite JSON-LD schema".to_string(),
            "Add FAQPage schema with frequently asked questions".to_string(),
            "Add optimized meta description".to_string(),
            "Add concrete numerical statistics (+40% AI visibility)".to_string(),
            "Cite authoritative sources with external links".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_blocked_citation_bots() {
    let server = MockServer::start().await;
    mount(&server, "/", 200, OPTIMIZED_HOMEPAGE).await;
    mount(
        &server,
        "/robots.txt",
        200,
        "User-agent: GPTBot\nAllow: /\n\nUser-agent: ClaudeBot\nDisallow: /\n",
    )
    .await;
    mount(&server, "/llms.txt", 200, LLMS_TXT).await;

    let result = auditor().run(&server.uri()).await.unwrap();

    assert_eq!(result.robots.bots_allowed, vec!["GPTBot"]);
    assert_eq!(result.robots.bots_blocked, vec!["ClaudeBot"]);
    assert!(!result.robots.citation_bots_ok);
    assert_eq!(result.breakdown.robots, 13);
    assert_eq!(result.score, 93);
    assert_eq!(result.recommendations.len(), 1);
}

#[tokio::test]
async fn test_server_errors_degrade_only_their_check() {
    let server = MockServer::start().await;
    mount(&server, "/", 200, OPTIMIZED_HOMEPAGE).await;
    mount(&server, "/robots.txt", 500, "oops").await;
    mount(&server, "/llms.txt", 503, "").await;

    let result = auditor().run(&server.uri()).await.unwrap();

    assert!(!result.robots.found);
    assert!(!result.llms.found);
    assert_eq!(result.score, 60);
}

#[tokio::test]
async fn test_unreachable_site() {
    // nothing listens on port 1
    let result = auditor().run("http://127.0.0.1:1").await.unwrap();

    assert_eq!(result.score, 0);
    assert_eq!(result.band, ScoreBand::Critical);
    assert!(!result.is_reachable());
    assert!(result.recommendations[0].starts_with("Unable to reach http://127.0.0.1:1: "));

    let json: serde_json::Value =
        serde_json::from_str(&format_audit(&result, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["score"], 0);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_cached_homepage_is_reused() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache").join("cache.db");
    let cache: Arc<Mutex<dyn ResponseCache>> =
        Arc::new(Mutex::new(open_cache(&cache_path, 3600).unwrap()));

    let server = MockServer::start().await;
    mount(&server, "/", 200, OPTIMIZED_HOMEPAGE).await;
    let url = server.uri();

    let first = auditor().with_cache(cache.clone()).run(&url).await.unwrap();
    let second = auditor().with_cache(cache.clone()).run(&url).await.unwrap();

    let homepage_hits = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/")
        .count();

    assert_eq!(homepage_hits, 1);
    assert_eq!(first.score, second.score);
    assert_eq!(cache.lock().unwrap().stats().unwrap().entries, 1);
    assert!(cache_path.exists());
}
