//! Plain-text audit report

use crate::audit::AuditResult;
use crate::scoring::ScoreBand;

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: u32 = 20;

const OK: &str = "[OK]";
const WARN: &str = "[!!]";
const FAIL: &str = "[XX]";

fn section_header(out: &mut Vec<String>, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push(String::new());
    out.push(rule.clone());
    out.push(format!("  {}", title));
    out.push(rule);
}

fn band_message(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Excellent => "EXCELLENT: site is well optimized for AI search engines",
        ScoreBand::Good => "GOOD: core optimizations in place, fine-tune content and schema",
        ScoreBand::Foundation => "FOUNDATION: core elements missing, apply the priority fixes below",
        ScoreBand::Critical => "CRITICAL: site is not visible to AI search engines",
    }
}

/// Formats the score as a 20-cell bar, one cell per 5 points
pub fn score_bar(score: u32) -> String {
    let filled = (score / 5).min(BAR_WIDTH) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH as usize - filled)
    )
}

/// Renders the human-readable report
pub fn format_text(result: &AuditResult) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push(String::new());
    out.push(format!("GEO AUDIT: {}", result.url));
    out.push(format!(
        "   Status: {} | Size: {} bytes",
        result.http_status, result.page_size
    ));
    if let Some(error) = &result.error {
        out.push(format!("   {} {}", FAIL, error));
    }

    let robots = &result.robots;
    section_header(&mut out, "1. ROBOTS.TXT: AI bot access");
    if !robots.found {
        out.push(format!("  {} robots.txt not found", FAIL));
    } else {
        out.push(format!("  {} robots.txt found", OK));
        for bot in &robots.bots_allowed {
            out.push(format!("  {} {} allowed", OK, bot));
        }
        for bot in &robots.bots_blocked {
            out.push(format!("  {} {} blocked", WARN, bot));
        }
        for bot in &robots.bots_missing {
            out.push(format!("  {} {} not configured", WARN, bot));
        }
        if robots.citation_bots_ok {
            out.push(format!("  {} All citation bots are allowed", OK));
        }
    }

    let llms = &result.llms;
    section_header(&mut out, "2. LLMS.TXT: AI index file");
    if !llms.found {
        out.push(format!("  {} llms.txt not found", FAIL));
    } else {
        out.push(format!("  {} llms.txt found (~{} words)", OK, llms.word_count));
        if llms.has_h1 {
            out.push(format!("  {} H1 present", OK));
        } else {
            out.push(format!("  {} H1 missing", FAIL));
        }
        if llms.has_sections {
            out.push(format!("  {} H2 sections present", OK));
        }
        if llms.has_links {
            out.push(format!("  {} Links found", OK));
        }
    }

    let schema = &result.schema;
    section_header(&mut out, "3. SCHEMA JSON-LD: structured data");
    if schema.found_types.is_empty() {
        out.push(format!("  {} No JSON-LD schema found on homepage", FAIL));
    } else {
        for schema_type in &schema.found_types {
            out.push(format!("  {} {} schema", OK, schema_type));
        }
        if !schema.has_website {
            out.push(format!("  {} WebSite schema missing", FAIL));
        }
        if !schema.has_faq {
            out.push(format!("  {} FAQPage schema missing", WARN));
        }
    }

    let meta = &result.meta;
    section_header(&mut out, "4. META TAGS: SEO and Open Graph");
    if meta.has_title {
        out.push(format!("  {} Title: {}", OK, meta.title_text));
    } else {
        out.push(format!("  {} Title missing", FAIL));
    }
    if meta.has_description {
        out.push(format!(
            "  {} Meta description ({} chars)",
            OK, meta.description_length
        ));
    } else {
        out.push(format!("  {} Meta description missing", FAIL));
    }
    if meta.has_canonical {
        out.push(format!("  {} Canonical: {}", OK, meta.canonical_url));
    }
    for (present, tag) in [
        (meta.has_og_title, "og:title"),
        (meta.has_og_description, "og:description"),
        (meta.has_og_image, "og:image"),
    ] {
        if present {
            out.push(format!("  {} {}", OK, tag));
        }
    }

    let content = &result.content;
    section_header(&mut out, "5. CONTENT QUALITY: GEO best practices");
    if content.has_h1 {
        out.push(format!("  {} H1: {}", OK, content.h1_text));
    } else {
        out.push(format!("  {} H1 missing on homepage", WARN));
    }
    let marker = |good: bool| if good { OK } else { WARN };
    out.push(format!(
        "  {} {} headings",
        marker(content.heading_count >= 3),
        content.heading_count
    ));
    if content.has_numbers {
        out.push(format!(
            "  {} {} numbers/statistics found",
            OK, content.numbers_count
        ));
    } else {
        out.push(format!("  {} Few numerical data points", WARN));
    }
    out.push(format!(
        "  {} ~{} words",
        marker(content.word_count >= 300),
        content.word_count
    ));
    if content.has_links {
        out.push(format!(
            "  {} {} external links",
            OK, content.external_links_count
        ));
    } else {
        out.push(format!("  {} No external source links", WARN));
    }

    if !result.extra_checks.is_empty() {
        section_header(&mut out, "EXTRA CHECKS (not scored)");
        for check in &result.extra_checks {
            out.push(format!(
                "  {} {}: {}/{} {}",
                marker(check.passed),
                check.name,
                check.score,
                check.max_score,
                check.message
            ));
        }
    }

    section_header(&mut out, "FINAL GEO SCORE");
    out.push(String::new());
    out.push(format!("  {} {}/100", score_bar(result.score), result.score));
    out.push(String::new());
    out.push(format!("  {}", band_message(result.band)));
    out.push(String::new());
    out.push(
        "  Score bands: 0-40 critical | 41-70 foundation | 71-90 good | 91-100 excellent"
            .to_string(),
    );

    out.push(String::new());
    out.push("  NEXT PRIORITY STEPS:".to_string());
    if result.recommendations.is_empty() {
        out.push("  All main optimizations are implemented.".to_string());
    } else {
        for (i, action) in result.recommendations.iter().enumerate() {
            out.push(format!("  {}. {}", i + 1, action));
        }
    }
    out.push(String::new());

    out.join("\n")
}
