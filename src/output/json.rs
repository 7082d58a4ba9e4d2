//! JSON audit report

use crate::audit::AuditResult;
use crate::output::check_summaries;
use serde_json::{json, Map, Value};

/// Renders the audit as pretty-printed JSON
///
/// Shape: `{url, timestamp, score, band, checks, recommendations}` where
/// `checks` maps each check key to `{score, max, passed, details}`.
/// `extra_checks` and `error` are only present when non-empty.
pub fn format_json(result: &AuditResult) -> Result<String, serde_json::Error> {
    let details = [
        serde_json::to_value(&result.robots)?,
        serde_json::to_value(&result.llms)?,
        json!({
            "has_website": result.schema.has_website,
            "has_webapp": result.schema.has_webapp,
            "has_faq": result.schema.has_faq,
            "found_types": result.schema.found_types,
        }),
        serde_json::to_value(&result.meta)?,
        serde_json::to_value(&result.content)?,
    ];

    let mut checks = Map::new();
    for (summary, details) in check_summaries(result).iter().zip(details) {
        checks.insert(
            summary.key.to_string(),
            json!({
                "score": summary.score,
                "max": summary.max,
                "passed": summary.passed,
                "details": details,
            }),
        );
    }

    let mut report = json!({
        "url": result.url,
        "timestamp": result.timestamp,
        "score": result.score,
        "band": result.band,
        "checks": checks,
        "recommendations": result.recommendations,
    });

    if let Value::Object(map) = &mut report {
        if !result.extra_checks.is_empty() {
            map.insert(
                "extra_checks".to_string(),
                serde_json::to_value(&result.extra_checks)?,
            );
        }
        if let Some(error) = &result.error {
            map.insert("error".to_string(), Value::String(error.clone()));
        }
    }

    serde_json::to_string_pretty(&report)
}
