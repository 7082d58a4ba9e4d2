//! Robots.txt directive parser
//!
//! Follows RFC 9309 group stacking: consecutive `User-agent` lines open one
//! shared group, and the `Allow`/`Disallow` lines that follow apply to every
//! agent in it. Any other directive ends the stack, so the next `User-agent`
//! line starts a fresh group.

/// Allow and disallow paths collected for one user agent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentRules {
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

/// Parsed robots.txt content
///
/// Agents keep the casing and order in which they first appear in the file.
/// A repeated agent merges into its first entry.
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    groups: Vec<(String, AgentRules)>,
    sitemaps: Vec<String>,
}

impl ParsedRobots {
    /// Parses raw robots.txt content
    ///
    /// Never fails: unknown directives and malformed lines are ignored, and
    /// empty or comment-only input yields no agents.
    pub fn parse(content: &str) -> Self {
        let mut robots = Self::default();
        let mut current: Vec<usize> = Vec::new();
        let mut last_was_agent = false;

        for raw in content.split(['\n', '\r']) {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                last_was_agent = false;
                continue;
            };

            match key.trim().to_ascii_lowercase().as_str() {
                "user-agent" => {
                    if !last_was_agent {
                        current.clear();
                    }
                    let agent = strip_comment(value);
                    current.push(robots.entry_index(&agent));
                    last_was_agent = true;
                }
                "disallow" => {
                    let path = strip_comment(value);
                    for &index in &current {
                        robots.groups[index].1.disallow.push(path.clone());
                    }
                    last_was_agent = false;
                }
                "allow" => {
                    let path = strip_comment(value);
                    for &index in &current {
                        robots.groups[index].1.allow.push(path.clone());
                    }
                    last_was_agent = false;
                }
                "sitemap" => {
                    let url = value.trim();
                    if !url.is_empty() {
                        robots.sitemaps.push(url.to_string());
                    }
                    last_was_agent = false;
                }
                _ => {
                    last_was_agent = false;
                }
            }
        }

        robots
    }

    /// Finds or creates the entry for an agent, keyed by exact spelling
    fn entry_index(&mut self, agent: &str) -> usize {
        match self.groups.iter().position(|(name, _)| name == agent) {
            Some(index) => index,
            None => {
                self.groups.push((agent.to_string(), AgentRules::default()));
                self.groups.len() - 1
            }
        }
    }

    /// Returns true when no user agent was declared
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Agents in file order, with their rules
    pub fn agents(&self) -> impl Iterator<Item = (&str, &AgentRules)> {
        self.groups.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Exact-spelling lookup
    pub fn rules_for(&self, agent: &str) -> Option<&AgentRules> {
        self.groups
            .iter()
            .find(|(name, _)| name == agent)
            .map(|(_, rules)| rules)
    }

    /// Case-insensitive lookup; the first matching agent in file order wins
    pub fn find_agent(&self, agent: &str) -> Option<(&str, &AgentRules)> {
        self.groups
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(agent))
            .map(|(name, rules)| (name.as_str(), rules))
    }

    /// `Sitemap:` URLs declared in the file
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }
}

/// Drops an inline `#` comment and surrounding whitespace
fn strip_comment(value: &str) -> String {
    value.split('#').next().unwrap_or_default().trim().to_string()
}
