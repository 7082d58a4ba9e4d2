//! AI bot classification against parsed robots.txt rules

use crate::robots::parser::ParsedRobots;
use serde::Serialize;

/// Access state of a single bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BotState {
    /// The bot may crawl the site (possibly with some paths excluded)
    Allowed,
    /// The whole site is disallowed for the bot
    Blocked,
    /// Neither the bot nor `*` is mentioned
    Missing,
}

/// Classification of one bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotStatus {
    pub bot: String,
    pub description: String,
    pub status: BotState,

    /// The robots.txt agent whose rules were applied
    pub matched_agent: Option<String>,

    /// Disallow paths of the matched agent (empty when fully allowed)
    pub disallow_paths: Vec<String>,
}

impl BotStatus {
    pub fn is_allowed(&self) -> bool {
        self.status == BotState::Allowed
    }
}

/// Returns true for rules covering the whole site
fn is_root_rule(path: &str) -> bool {
    path == "/" || path == "/*"
}

/// Classifies a bot against the parsed rules
///
/// # Resolution
///
/// 1. Agent matching the bot name case-insensitively (first in file order)
/// 2. Otherwise the `*` agent
/// 3. Otherwise the bot is `missing`
///
/// A root `Disallow` (`/` or `/*`) blocks the bot unless the same agent also
/// has a root `Allow`. Any narrower `Disallow` leaves the bot allowed and is
/// reported in `disallow_paths`.
///
/// # Arguments
///
/// * `bot` - Bot user-agent token (e.g., "GPTBot")
/// * `description` - Human-readable owner/purpose
/// * `robots` - Parsed robots.txt
pub fn classify_bot(bot: &str, description: &str, robots: &ParsedRobots) -> BotStatus {
    let matched = robots
        .find_agent(bot)
        .or_else(|| robots.rules_for("*").map(|rules| ("*", rules)));

    let Some((agent, rules)) = matched else {
        return BotStatus {
            bot: bot.to_string(),
            description: description.to_string(),
            status: BotState::Missing,
            matched_agent: None,
            disallow_paths: Vec::new(),
        };
    };

    let blocks_root = rules.disallow.iter().any(|p| is_root_rule(p));
    let allows_root = rules.allow.iter().any(|p| is_root_rule(p));

    let (status, disallow_paths) = if blocks_root && !allows_root {
        (BotState::Blocked, rules.disallow.clone())
    } else if rules.disallow.iter().all(|p| p.is_empty()) {
        (BotState::Allowed, Vec::new())
    } else {
        (BotState::Allowed, rules.disallow.clone())
    };

    BotStatus {
        bot: bot.to_string(),
        description: description.to_string(),
        status,
        matched_agent: Some(agent.to_string()),
        disallow_paths,
    }
}
