//! Homepage and resource checks
//!
//! The four built-in signal extractors (llms.txt, JSON-LD, meta tags and
//! content quality) are plain functions over fetched content. Additional
//! checks implement [`AuditCheck`] and are handed to the
//! [`Auditor`](crate::audit::Auditor) explicitly; their results are reported
//! next to the score but never change it.

mod content;
mod llms;
mod meta;
mod schema;
mod validation;

pub use content::{check_content, ContentResult, NUMBER_PATTERN};
pub use llms::{analyze_llms_txt, check_llms_txt, LlmsTxtResult};
pub use meta::{check_meta, MetaResult};
pub use schema::{check_schema, SchemaResult};
pub use validation::{required_fields, validate_jsonld, SchemaValidationCheck};

use scraper::Html;
use serde::Serialize;

/// Everything an extra check can look at
pub struct AuditContext<'a> {
    /// Normalized base URL of the audited site
    pub url: &'a str,

    /// Parsed homepage
    pub document: &'a Html,

    /// JSON-LD found on the homepage
    pub schema: &'a SchemaResult,
}

/// Result of an extra check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub passed: bool,
    pub details: serde_json::Value,
    pub message: String,
}

impl CheckResult {
    /// A failed result with zero score
    pub fn failed(check: &dyn AuditCheck, message: impl Into<String>) -> Self {
        Self {
            name: check.name().to_string(),
            score: 0,
            max_score: check.max_score(),
            passed: false,
            details: serde_json::Value::Null,
            message: message.into(),
        }
    }
}

/// An additional audit check
///
/// Implementations must not panic; problems are reported through a failed
/// [`CheckResult`].
pub trait AuditCheck: Send + Sync {
    /// Unique, machine-friendly name
    fn name(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str;

    /// Maximum score the check can award
    fn max_score(&self) -> u32;

    /// Runs the check against the audited homepage
    fn run(&self, ctx: &AuditContext<'_>) -> CheckResult;
}
