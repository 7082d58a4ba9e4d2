//! GEO score aggregation
//!
//! Turns the five check results into a 0-100 score, a band and an ordered
//! list of recommendations. The computation is deterministic and never
//! touches the network.
//!
//! | Check | Max | Points |
//! |-------|-----|--------|
//! | robots.txt | 20 | found 5; all citation bots allowed 15, else some bot allowed 8 |
//! | llms.txt | 20 | found 10; then H1 3, sections 4, links 3 |
//! | JSON-LD | 25 | WebSite 10, FAQPage 10, WebApplication 5 |
//! | Meta tags | 20 | title 5, description 8, canonical 3, og:title + og:description 4 |
//! | Content | 15 | H1 4, statistics 6, external citations 5 |

use crate::checks::{ContentResult, LlmsTxtResult, MetaResult, SchemaResult};
use crate::robots::RobotsResult;
use serde::Serialize;
use std::fmt;

pub const ROBOTS_FOUND: u32 = 5;
pub const ROBOTS_CITATION_OK: u32 = 15;
pub const ROBOTS_SOME_ALLOWED: u32 = 8;

pub const LLMS_FOUND: u32 = 10;
pub const LLMS_H1: u32 = 3;
pub const LLMS_SECTIONS: u32 = 4;
pub const LLMS_LINKS: u32 = 3;

pub const SCHEMA_WEBSITE: u32 = 10;
pub const SCHEMA_FAQ: u32 = 10;
pub const SCHEMA_WEBAPP: u32 = 5;

pub const META_TITLE: u32 = 5;
pub const META_DESCRIPTION: u32 = 8;
pub const META_CANONICAL: u32 = 3;
pub const META_OG: u32 = 4;

pub const CONTENT_H1: u32 = 4;
pub const CONTENT_NUMBERS: u32 = 6;
pub const CONTENT_LINKS: u32 = 5;

pub const ROBOTS_MAX: u32 = 20;
pub const LLMS_MAX: u32 = 20;
pub const SCHEMA_MAX: u32 = 25;
pub const META_MAX: u32 = 20;
pub const CONTENT_MAX: u32 = 15;

/// Score band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Critical,
    Foundation,
    Good,
    Excellent,
}

impl ScoreBand {
    /// Maps a score to its band; anything outside 0-100 is critical
    pub fn from_score(score: i64) -> Self {
        match score {
            91..=100 => Self::Excellent,
            71..=90 => Self::Good,
            41..=70 => Self::Foundation,
            _ => Self::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Foundation => "foundation",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points earned by each check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub robots: u32,
    pub llms: u32,
    pub schema: u32,
    pub meta: u32,
    pub content: u32,
}

impl ScoreBreakdown {
    /// Computes the points of every check
    pub fn compute(
        robots: &RobotsResult,
        llms: &LlmsTxtResult,
        schema: &SchemaResult,
        meta: &MetaResult,
        content: &ContentResult,
    ) -> Self {
        Self {
            robots: robots_points(robots),
            llms: llms_points(llms),
            schema: schema_points(schema),
            meta: meta_points(meta),
            content: content_points(content),
        }
    }

    /// Sum of all checks, capped at 100
    pub fn total(&self) -> u32 {
        (self.robots + self.llms + self.schema + self.meta + self.content).min(100)
    }
}

fn points(condition: bool, value: u32) -> u32 {
    if condition {
        value
    } else {
        0
    }
}

pub fn robots_points(robots: &RobotsResult) -> u32 {
    let access = if robots.citation_bots_ok {
        ROBOTS_CITATION_OK
    } else {
        points(!robots.bots_allowed.is_empty(), ROBOTS_SOME_ALLOWED)
    };
    points(robots.found, ROBOTS_FOUND) + access
}

pub fn llms_points(llms: &LlmsTxtResult) -> u32 {
    if !llms.found {
        return 0;
    }
    LLMS_FOUND
        + points(llms.has_h1, LLMS_H1)
        + points(llms.has_sections, LLMS_SECTIONS)
        + points(llms.has_links, LLMS_LINKS)
}

pub fn schema_points(schema: &SchemaResult) -> u32 {
    points(schema.has_website, SCHEMA_WEBSITE)
        + points(schema.has_faq, SCHEMA_FAQ)
        + points(schema.has_webapp, SCHEMA_WEBAPP)
}

pub fn meta_points(meta: &MetaResult) -> u32 {
    points(meta.has_title, META_TITLE)
        + points(meta.has_description, META_DESCRIPTION)
        + points(meta.has_canonical, META_CANONICAL)
        + points(meta.has_og_title && meta.has_og_description, META_OG)
}

pub fn content_points(content: &ContentResult) -> u32 {
    points(content.has_h1, CONTENT_H1)
        + points(content.has_numbers, CONTENT_NUMBERS)
        + points(content.has_links, CONTENT_LINKS)
}

/// Computes the GEO score (0-100)
pub fn compute_geo_score(
    robots: &RobotsResult,
    llms: &LlmsTxtResult,
    schema: &SchemaResult,
    meta: &MetaResult,
    content: &ContentResult,
) -> u32 {
    ScoreBreakdown::compute(robots, llms, schema, meta, content).total()
}

/// Builds the recommendation list, in fixed priority order
pub fn build_recommendations(
    base_url: &str,
    robots: &RobotsResult,
    llms: &LlmsTxtResult,
    schema: &SchemaResult,
    meta: &MetaResult,
    content: &ContentResult,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !robots.citation_bots_ok {
        recommendations.push(
            "Update robots.txt to allow all AI citation bots (OAI-SearchBot, ClaudeBot, PerplexityBot)"
                .to_string(),
        );
    }
    if !llms.found {
        recommendations.push(format!(
            "Create /llms.txt: geo llms --base-url {}",
            base_url
        ));
    }
    if !schema.has_website {
        recommendations.push("Add WebSite JSON-LD schema".to_string());
    }
    if !schema.has_faq {
        recommendations.push("Add FAQPage schema with frequently asked questions".to_string());
    }
    if !meta.has_description {
        recommendations.push("Add optimized meta description".to_string());
    }
    if !content.has_numbers {
        recommendations.push("Add concrete numerical statistics (+40% AI visibility)".to_string());
    }
    if !content.has_links {
        recommendations.push("Cite authoritative sources with external links".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect() -> (RobotsResult, LlmsTxtResult, SchemaResult, MetaResult, ContentResult) {
        (
            RobotsResult {
                found: true,
                bots_allowed: vec!["OAI-SearchBot".into(), "ClaudeBot".into(), "PerplexityBot".into()],
                citation_bots_ok: true,
                ..RobotsResult::default()
            },
            LlmsTxtResult {
                found: true,
                has_h1: true,
                has_description: true,
                has_sections: true,
                has_links: true,
                word_count: 100,
            },
            SchemaResult {
                has_website: true,
                has_faq: true,
                has_webapp: true,
                ..SchemaResult::default()
            },
            MetaResult {
                has_title: true,
                has_description: true,
                has_canonical: true,
                has_og_title: true,
                has_og_description: true,
                ..MetaResult::default()
            },
            ContentResult {
                has_h1: true,
                has_numbers: true,
                has_links: true,
                ..ContentResult::default()
            },
        )
    }

    #[test]
    fn test_all_defaults_score_zero() {
        let score = compute_geo_score(
            &RobotsResult::default(),
            &LlmsTxtResult::default(),
            &SchemaResult::default(),
            &MetaResult::default(),
            &ContentResult::default(),
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn test_everything_scores_100() {
        let (r, l, s, m, c) = perfect();
        let breakdown = ScoreBreakdown::compute(&r, &l, &s, &m, &c);

        assert_eq!(
            breakdown,
            ScoreBreakdown {
                robots: ROBOTS_MAX,
                llms: LLMS_MAX,
                schema: SCHEMA_MAX,
                meta: META_MAX,
                content: CONTENT_MAX,
            }
        );
        assert_eq!(breakdown.total(), 100);
        assert!(build_recommendations("https://x.com", &r, &l, &s, &m, &c).is_empty());
    }

    #[test]
    fn test_robots_points_are_exclusive() {
        let mut robots = RobotsResult {
            found: true,
            bots_allowed: vec!["GPTBot".into()],
            ..RobotsResult::default()
        };
        assert_eq!(robots_points(&robots), 13);

        robots.citation_bots_ok = true;
        assert_eq!(robots_points(&robots), 20);

        robots.bots_allowed.clear();
        robots.citation_bots_ok = false;
        assert_eq!(robots_points(&robots), 5);
    }

    #[test]
    fn test_llms_subpoints_require_found() {
        let llms = LlmsTxtResult {
            found: false,
            has_h1: true,
            has_sections: true,
            has_links: true,
            ..LlmsTxtResult::default()
        };
        assert_eq!(llms_points(&llms), 0);
    }

    #[test]
    fn test_og_needs_title_and_description() {
        let meta = MetaResult {
            has_og_title: true,
            has_og_image: true,
            ..MetaResult::default()
        };
        assert_eq!(meta_points(&meta), 0);
    }

    type Inputs = (
        RobotsResult,
        LlmsTxtResult,
        SchemaResult,
        MetaResult,
        ContentResult,
    );

    fn score_of((r, l, s, m, c): &Inputs) -> u32 {
        compute_geo_score(r, l, s, m, c)
    }

    /// Every scored boolean, with a setter
    fn flags() -> [(&'static str, fn(&mut Inputs, bool)); 20] {
        [
            ("robots.found", |i, v| i.0.found = v),
            ("robots.citation_bots_ok", |i, v| i.0.citation_bots_ok = v),
            ("robots.some_allowed", |i, v| {
                i.0.bots_allowed = if v { vec!["GPTBot".into()] } else { Vec::new() }
            }),
            ("llms.found", |i, v| i.1.found = v),
            ("llms.has_h1", |i, v| i.1.has_h1 = v),
            ("llms.has_description", |i, v| i.1.has_description = v),
            ("llms.has_sections", |i, v| i.1.has_sections = v),
            ("llms.has_links", |i, v| i.1.has_links = v),
            ("schema.has_website", |i, v| i.2.has_website = v),
            ("schema.has_faq", |i, v| i.2.has_faq = v),
            ("schema.has_webapp", |i, v| i.2.has_webapp = v),
            ("meta.has_title", |i, v| i.3.has_title = v),
            ("meta.has_description", |i, v| i.3.has_description = v),
            ("meta.has_canonical", |i, v| i.3.has_canonical = v),
            ("meta.has_og_title", |i, v| i.3.has_og_title = v),
            ("meta.has_og_description", |i, v| i.3.has_og_description = v),
            ("meta.has_og_image", |i, v| i.3.has_og_image = v),
            ("content.has_h1", |i, v| i.4.has_h1 = v),
            ("content.has_numbers", |i, v| i.4.has_numbers = v),
            ("content.has_links", |i, v| i.4.has_links = v),
        ]
    }

    #[test]
    fn test_single_flag_never_lowers_score() {
        let baselines: [(&str, Inputs); 2] =
            [("empty", Inputs::default()), ("perfect", perfect())];

        for (baseline_name, baseline) in baselines {
            for (flag, set) in flags() {
                let mut off = baseline.clone();
                set(&mut off, false);
                let mut on = baseline.clone();
                set(&mut on, true);

                assert!(
                    score_of(&on) >= score_of(&off),
                    "{} lowered the score from the {} baseline",
                    flag,
                    baseline_name
                );
            }
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Critical);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Critical);
        assert_eq!(ScoreBand::from_score(41), ScoreBand::Foundation);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::Foundation);
        assert_eq!(ScoreBand::from_score(71), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(90), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(91), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
    }

    #[test]
    fn test_out_of_range_is_critical() {
        assert_eq!(ScoreBand::from_score(-1), ScoreBand::Critical);
        assert_eq!(ScoreBand::from_score(101), ScoreBand::Critical);
    }

    #[test]
    fn test_bands_partition_range() {
        for score in 0..=100 {
            let band = ScoreBand::from_score(score);
            let expected = if score <= 40 {
                ScoreBand::Critical
            } else if score <= 70 {
                ScoreBand::Foundation
            } else if score <= 90 {
                ScoreBand::Good
            } else {
                ScoreBand::Excellent
            };
            assert_eq!(band, expected, "score {}", score);
        }
    }

    #[test]
    fn test_recommendation_order() {
        let recs = build_recommendations(
            "https://example.com",
            &RobotsResult::default(),
            &LlmsTxtResult::default(),
            &SchemaResult::default(),
            &MetaResult::default(),
            &ContentResult::default(),
        );

        assert_eq!(recs.len(), 7);
        assert!(recs[0].starts_with("Update robots.txt"));
        assert_eq!(recs[1], "Create /llms.txt: geo llms --base-url https://example.com");
        assert_eq!(recs[2], "Add WebSite JSON-LD schema");
        assert_eq!(recs[3], "Add FAQPage schema with frequently asked questions");
        assert_eq!(recs[4], "Add optimized meta description");
        assert_eq!(recs[5], "Add concrete numerical statistics (+40% AI visibility)");
        assert_eq!(recs[6], "Cite authoritative sources with external links");
    }
}
