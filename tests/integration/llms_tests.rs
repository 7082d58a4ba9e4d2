//! End-to-end llms.txt generation against a mock site

use crate::test_http_config;
use geo_optimizer::fetch::HttpFetcher;
use geo_optimizer::sitemap::{fetch_sitemap, generate_llms_txt, GeneratorOptions, LlmsSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, verb: &str, route: &str, status: u16, body: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&test_http_config()).unwrap()
}

fn options() -> GeneratorOptions {
    GeneratorOptions {
        site_name: Some("Acme".to_string()),
        description: Some("Online calculators".to_string()),
        allow_private_hosts: true,
        ..GeneratorOptions::default()
    }
}

#[tokio::test]
async fn test_sitemap_from_robots_to_document() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "GET",
        "/robots.txt",
        200,
        &format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap_index.xml\n", base),
    )
    .await;
    mount(
        &server,
        "GET",
        "/sitemap_index.xml",
        200,
        &format!(
            "<sitemapindex><sitemap><loc>{0}/pages.xml</loc></sitemap><sitemap><loc>/empty.xml</loc></sitemap></sitemapindex>",
            base
        ),
    )
    .await;
    mount(
        &server,
        "GET",
        "/pages.xml",
        200,
        &format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{0}/</loc><priority>1.0</priority></url>
  <url><loc>{0}/tools/loan-calculator</loc><priority>0.9</priority></url>
  <url><loc>{0}/blog/saving-tips</loc><priority>0.4</priority></url>
  <url><loc>{0}/wp-admin/</loc></url>
  <url><loc>{0}/feed.xml</loc></url>
  <url><loc>https://evil.example/blog/spam</loc></url>
  <url><loc>{0}/privacy</loc><priority>0.1</priority></url>
</urlset>"#,
            base
        ),
    )
    .await;

    let generated = generate_llms_txt(&fetcher(), &base, None, &options())
        .await
        .unwrap();

    assert_eq!(
        generated.source,
        LlmsSource::Sitemap {
            url: format!("{}/sitemap_index.xml", base),
            entries: 7
        }
    );

    let expected = format!(
        "# Acme\n\n> Online calculators\n\n\n\
The main homepage is available at: [Acme]({0}/)\n\n\
## Tools\n\n\
- [Loan Calculator]({0}/tools/loan-calculator)\n\n\
## Blog & Articles\n\n\
- [Saving Tips]({0}/blog/saving-tips)\n\n\
## Optional\n\n\
- [Privacy]({0}/privacy): Privacy & Legal\n",
        base
    );
    assert_eq!(generated.content, expected);
}

#[tokio::test]
async fn test_common_sitemap_location() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(&server, "HEAD", "/wp-sitemap.xml", 200, "").await;
    mount(
        &server,
        "GET",
        "/wp-sitemap.xml",
        200,
        &format!("<urlset><url><loc>{}/pricing</loc></url></urlset>", base),
    )
    .await;

    let generated = generate_llms_txt(&fetcher(), &base, None, &options())
        .await
        .unwrap();

    assert!(generated.content.contains("## Main Pages"));
    assert!(generated
        .content
        .contains(&format!("- [Pricing]({}/pricing)", base)));
}

#[tokio::test]
async fn test_no_sitemap_gives_minimal_document() {
    let server = MockServer::start().await;
    let base = server.uri();

    let generated = generate_llms_txt(&fetcher(), &base, None, &options())
        .await
        .unwrap();

    assert_eq!(generated.source, LlmsSource::Minimal);
    assert_eq!(
        generated.content,
        format!(
            "# Acme\n\n> Online calculators\n\n## Main Pages\n\n- [Homepage]({})\n",
            base
        )
    );
}

#[tokio::test]
async fn test_self_referencing_index_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();
    let index_url = format!("{}/sitemap.xml", base);

    mount(
        &server,
        "GET",
        "/sitemap.xml",
        200,
        &format!(
            "<sitemapindex><sitemap><loc>{0}</loc></sitemap><sitemap><loc>{0}</loc></sitemap></sitemapindex>",
            index_url
        ),
    )
    .await;

    let urls = fetch_sitemap(&fetcher(), &index_url).await;
    assert!(urls.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_fetch_titles_over_http() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "GET",
        "/map.xml",
        200,
        &format!(
            "<urlset><url><loc>{0}/about</loc></url><url><loc>{0}/missing</loc></url></urlset>",
            base
        ),
    )
    .await;
    mount(
        &server,
        "GET",
        "/about",
        200,
        "<html><head><title>About Acme</title></head></html>",
    )
    .await;

    let opts = GeneratorOptions {
        fetch_titles: true,
        ..options()
    };
    let sitemap = format!("{}/map.xml", base);
    let generated = generate_llms_txt(&fetcher(), &base, Some(&sitemap), &opts)
        .await
        .unwrap();

    assert!(generated
        .content
        .contains(&format!("- [About Acme]({}/about)", base)));
    assert!(generated
        .content
        .contains(&format!("- [Missing]({}/missing)", base)));
}
