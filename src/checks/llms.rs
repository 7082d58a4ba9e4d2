//! llms.txt structure check

use crate::fetch::FetchedResponse;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));

/// Structural markers found in llms.txt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LlmsTxtResult {
    pub found: bool,
    pub has_h1: bool,
    pub has_description: bool,
    pub has_sections: bool,
    pub has_links: bool,
    pub word_count: usize,
}

/// Inspects llms.txt content
///
/// Markers are matched at the start of a line, so `#` followed by a space is
/// an H1 while `##` is a section.
pub fn analyze_llms_txt(content: &str) -> LlmsTxtResult {
    let mut result = LlmsTxtResult {
        found: true,
        ..LlmsTxtResult::default()
    };

    for line in content.split(['\n', '\r']) {
        if line.starts_with("# ") {
            result.has_h1 = true;
        }
        if line.starts_with("> ") {
            result.has_description = true;
        }
        if line.starts_with("## ") {
            result.has_sections = true;
        }
    }

    result.has_links = MARKDOWN_LINK_RE.is_match(content);
    result.word_count = content.split_whitespace().count();

    result
}

/// Runs the llms.txt check on a fetched response; non-200 means not found
pub fn check_llms_txt(response: Option<&FetchedResponse>) -> LlmsTxtResult {
    match response {
        Some(response) if response.is_ok() => analyze_llms_txt(&response.body),
        _ => LlmsTxtResult::default(),
    }
}
