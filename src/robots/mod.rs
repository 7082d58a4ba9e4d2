//! Robots.txt analysis module
//!
//! This module parses robots.txt and reports, for every known AI crawler,
//! whether it may access the site. Citation-critical bots (the ones answer
//! engines use to fetch pages they cite) get their own verdict.

mod classifier;
mod parser;

pub use classifier::{classify_bot, BotState, BotStatus};
pub use parser::{AgentRules, ParsedRobots};

use crate::fetch::FetchedResponse;
use serde::Serialize;
use std::collections::BTreeMap;

/// Known AI crawlers, in reporting order
pub const AI_BOTS: &[(&str, &str)] = &[
    ("GPTBot", "OpenAI (ChatGPT training)"),
    ("OAI-SearchBot", "OpenAI (ChatGPT search citations)"),
    ("ChatGPT-User", "OpenAI (ChatGPT on-demand fetch)"),
    ("anthropic-ai", "Anthropic (Claude training)"),
    ("ClaudeBot", "Anthropic (Claude citations)"),
    ("claude-web", "Anthropic (Claude web crawl)"),
    ("PerplexityBot", "Perplexity AI (index builder)"),
    ("Perplexity-User", "Perplexity (citation fetch on-demand)"),
    ("Google-Extended", "Google (Gemini training)"),
    ("Applebot-Extended", "Apple (AI training)"),
    ("cohere-ai", "Cohere (language models)"),
    ("DuckAssistBot", "DuckDuckGo AI"),
    ("Bytespider", "ByteDance/TikTok AI"),
    ("meta-externalagent", "Meta AI (Facebook/Instagram AI)"),
];

/// Bots whose access decides whether AI answers can cite the site
pub const CITATION_BOTS: &[&str] = &["OAI-SearchBot", "ClaudeBot", "PerplexityBot"];

/// The list of bots to classify
///
/// Starts from [`AI_BOTS`] and may be extended with project-specific bots,
/// which are appended after the built-in ones.
#[derive(Debug, Clone)]
pub struct BotRoster {
    bots: Vec<(String, String)>,
}

impl Default for BotRoster {
    fn default() -> Self {
        Self {
            bots: AI_BOTS
                .iter()
                .map(|(name, desc)| (name.to_string(), desc.to_string()))
                .collect(),
        }
    }
}

impl BotRoster {
    /// Built-in roster plus extra bots; names already present are skipped
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        let mut roster = Self::default();
        for (name, desc) in extra {
            if !roster
                .bots
                .iter()
                .any(|(known, _)| known.eq_ignore_ascii_case(name))
            {
                roster.bots.push((name.clone(), desc.clone()));
            }
        }
        roster
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bots.iter().map(|(n, d)| (n.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

/// Outcome of the robots.txt check
#[derive(Debug, Clone, Default, Serialize)]
pub struct RobotsResult {
    pub found: bool,
    pub bots_allowed: Vec<String>,
    pub bots_missing: Vec<String>,
    pub bots_blocked: Vec<String>,
    pub citation_bots_ok: bool,

    /// Per-bot details, in roster order
    #[serde(skip)]
    pub statuses: Vec<BotStatus>,
}

/// Classifies every roster bot against robots.txt content
pub fn analyze_robots(content: &str, roster: &BotRoster) -> RobotsResult {
    let parsed = ParsedRobots::parse(content);
    let mut result = RobotsResult {
        found: true,
        ..RobotsResult::default()
    };

    for (bot, description) in roster.iter() {
        let status = classify_bot(bot, description, &parsed);
        match status.status {
            BotState::Allowed => result.bots_allowed.push(bot.to_string()),
            BotState::Blocked => result.bots_blocked.push(bot.to_string()),
            BotState::Missing => result.bots_missing.push(bot.to_string()),
        }
        result.statuses.push(status);
    }

    result.citation_bots_ok = CITATION_BOTS
        .iter()
        .all(|bot| result.bots_allowed.iter().any(|allowed| allowed == bot));

    result
}

/// Runs the robots.txt check on a fetched response
///
/// Anything but an HTTP 200 (including no response at all) means robots.txt
/// was not found and every list stays empty.
pub fn check_robots(response: Option<&FetchedResponse>, roster: &BotRoster) -> RobotsResult {
    match response {
        Some(response) if response.is_ok() => analyze_robots(&response.body, roster),
        Some(response) => {
            tracing::debug!("robots.txt returned HTTP {}", response.status);
            RobotsResult::default()
        }
        None => RobotsResult::default(),
    }
}
