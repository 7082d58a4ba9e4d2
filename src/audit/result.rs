use crate::checks::{CheckResult, ContentResult, LlmsTxtResult, MetaResult, SchemaResult};
use crate::robots::RobotsResult;
use crate::scoring::{ScoreBand, ScoreBreakdown};
use chrono::Utc;
use serde::Serialize;

/// Complete outcome of one audit
///
/// Built once by the [`Auditor`](crate::audit::Auditor); formatters only read it.
#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    /// Normalized base URL
    pub url: String,

    /// RFC 3339 time the audit finished
    pub timestamp: String,

    pub score: u32,
    pub band: ScoreBand,
    pub breakdown: ScoreBreakdown,

    pub robots: RobotsResult,
    pub llms: LlmsTxtResult,
    pub schema: SchemaResult,
    pub meta: MetaResult,
    pub content: ContentResult,

    pub recommendations: Vec<String>,

    /// Homepage status code (0 when unreachable)
    pub http_status: u16,

    /// Homepage size in bytes
    pub page_size: usize,

    /// Results of the extra checks; they do not affect the score
    pub extra_checks: Vec<CheckResult>,

    /// Set when the homepage could not be fetched
    pub error: Option<String>,
}

impl AuditResult {
    /// Result for a homepage that could not be fetched
    ///
    /// Score is 0, band is critical, and the only recommendation explains
    /// why the site could not be audited.
    pub fn unreachable(url: &str, reason: &str) -> Self {
        Self {
            url: url.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            score: 0,
            band: ScoreBand::Critical,
            breakdown: ScoreBreakdown::default(),
            robots: RobotsResult::default(),
            llms: LlmsTxtResult::default(),
            schema: SchemaResult::default(),
            meta: MetaResult::default(),
            content: ContentResult::default(),
            recommendations: vec![format!("Unable to reach {}: {}", url, reason)],
            http_status: 0,
            page_size: 0,
            extra_checks: Vec::new(),
            error: Some(reason.to_string()),
        }
    }

    /// Returns true when the homepage was fetched and scored
    pub fn is_reachable(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_result() {
        let result = AuditResult::unreachable("https://down.example", "connection refused");

        assert_eq!(result.score, 0);
        assert_eq!(result.band, ScoreBand::Critical);
        assert_eq!(
            result.recommendations,
            vec!["Unable to reach https://down.example: connection refused"]
        );
        assert!(!result.is_reachable());
        assert!(!result.robots.found);
    }
}
