//! Output module for rendering audit reports
//!
//! This module handles:
//! - Human-readable text reports
//! - JSON reports for tooling
//! - GitHub Actions annotations
//! - SVG score badges

mod badge;
mod github;
mod json;
mod text;

pub use badge::{band_color, generate_badge_svg, DEFAULT_BADGE_LABEL, MAX_LABEL_LENGTH};
pub use github::format_github;
pub use json::format_json;
pub use text::format_text;

use crate::audit::AuditResult;
use crate::scoring::{CONTENT_MAX, LLMS_MAX, META_MAX, ROBOTS_MAX, SCHEMA_MAX};
use serde::Deserialize;

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}

/// Score line of one check, shared by the formatters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    /// Key used in the JSON report
    pub key: &'static str,

    /// Display name
    pub name: &'static str,

    pub score: u32,
    pub max: u32,
    pub passed: bool,
}

/// The five scored checks in report order
pub fn check_summaries(result: &AuditResult) -> [CheckSummary; 5] {
    let b = &result.breakdown;
    [
        CheckSummary {
            key: "robots_txt",
            name: "Robots.txt",
            score: b.robots,
            max: ROBOTS_MAX,
            passed: result.robots.citation_bots_ok,
        },
        CheckSummary {
            key: "llms_txt",
            name: "llms.txt",
            score: b.llms,
            max: LLMS_MAX,
            passed: result.llms.found && result.llms.has_h1,
        },
        CheckSummary {
            key: "schema_jsonld",
            name: "Schema JSON-LD",
            score: b.schema,
            max: SCHEMA_MAX,
            passed: result.schema.has_website,
        },
        CheckSummary {
            key: "meta_tags",
            name: "Meta Tags",
            score: b.meta,
            max: META_MAX,
            passed: result.meta.has_title && result.meta.has_description,
        },
        CheckSummary {
            key: "content",
            name: "Content Quality",
            score: b.content,
            max: CONTENT_MAX,
            passed: result.content.has_h1,
        },
    ]
}

/// Renders an audit in the requested format
pub fn format_audit(result: &AuditResult, format: OutputFormat) -> crate::Result<String> {
    Ok(match format {
        OutputFormat::Text => format_text(result),
        OutputFormat::Json => format_json(result)?,
        OutputFormat::Github => format_github(result),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::audit::AuditResult;
    use crate::checks::{ContentResult, LlmsTxtResult, MetaResult, SchemaResult};
    use crate::robots::RobotsResult;
    use crate::scoring::{build_recommendations, ScoreBand, ScoreBreakdown};

    /// A mid-range audit: robots partially open, no llms.txt, WebSite schema only
    pub fn sample_result() -> AuditResult {
        let robots = RobotsResult {
            found: true,
            bots_allowed: vec!["GPTBot".to_string()],
            bots_blocked: vec!["ClaudeBot".to_string()],
            bots_missing: vec!["PerplexityBot".to_string()],
            citation_bots_ok: false,
            statuses: Vec::new(),
        };
        let llms = LlmsTxtResult::default();
        let schema = SchemaResult {
            found_types: vec!["WebSite".to_string()],
            has_website: true,
            ..SchemaResult::default()
        };
        let meta = MetaResult {
            has_title: true,
            title_text: "Example Site".to_string(),
            title_length: 12,
            has_description: true,
            description_text: "An example".to_string(),
            description_length: 10,
            ..MetaResult::default()
        };
        let content = ContentResult {
            has_h1: true,
            h1_text: "Welcome".to_string(),
            heading_count: 4,
            word_count: 320,
            ..ContentResult::default()
        };

        let breakdown = ScoreBreakdown::compute(&robots, &llms, &schema, &meta, &content);
        let score = breakdown.total();
        let recommendations =
            build_recommendations("https://example.com", &robots, &llms, &schema, &meta, &content);

        AuditResult {
            url: "https://example.com".to_string(),
            timestamp: "2024-05-01T12:00:00+00:00".to_string(),
            score,
            band: ScoreBand::from_score(i64::from(score)),
            breakdown,
            robots,
            llms,
            schema,
            meta,
            content,
            recommendations,
            http_status: 200,
            page_size: 2048,
            extra_checks: Vec::new(),
            error: None,
        }
    }
}
