//! GitHub Actions workflow annotations

use crate::audit::AuditResult;
use crate::output::check_summaries;

/// Renders the audit as `::notice::` / `::warning::` / `::error::` lines
///
/// The score line is a notice from 71 up, a warning from 41 up and an error
/// below. Every failed check and every recommendation adds a warning.
pub fn format_github(result: &AuditResult) -> String {
    let level = match result.score {
        71.. => "notice",
        41.. => "warning",
        _ => "error",
    };

    let mut lines = vec![format!(
        "::{}::GEO Score: {}/100 ({}) — {}",
        level,
        result.score,
        result.band.as_str().to_uppercase(),
        result.url
    )];

    for check in check_summaries(result).iter().filter(|c| !c.passed) {
        lines.push(format!("::warning::{}: {}/{}", check.name, check.score, check.max));
    }

    for recommendation in &result.recommendations {
        lines.push(format!("::warning::{}", recommendation));
    }

    lines.join("\n")
}
