//! JSON-LD structured data detection

use scraper::{Html, Selector};
use serde::Serialize;
use serde_json::Value;

/// JSON-LD found on a page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaResult {
    /// Every `@type` seen, in document order; may repeat
    pub found_types: Vec<String>,
    pub has_website: bool,
    pub has_webapp: bool,
    pub has_faq: bool,

    /// One entry per parsed JSON-LD object, regardless of how many types it declares
    pub raw_schemas: Vec<Value>,
}

impl SchemaResult {
    fn record(&mut self, object: &Value) {
        let types: Vec<String> = match object.get("@type") {
            None => vec!["unknown".to_string()],
            Some(Value::String(t)) => vec![t.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(other) => vec![other.to_string()],
        };

        for t in types {
            match t.as_str() {
                "WebSite" => self.has_website = true,
                "WebApplication" => self.has_webapp = true,
                "FAQPage" => self.has_faq = true,
                _ => {}
            }
            self.found_types.push(t);
        }

        self.raw_schemas.push(object.clone());
    }
}

/// Extracts JSON-LD blocks from a parsed page
///
/// Empty blocks and blocks that are not valid JSON are skipped. A top-level
/// array contributes each of its objects; non-object entries are ignored.
pub fn check_schema(document: &Html) -> SchemaResult {
    let mut result = SchemaResult::default();

    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return result;
    };

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let data: Value = match serde_json::from_str(raw) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Skipping malformed JSON-LD block: {}", e);
                continue;
            }
        };

        match &data {
            Value::Array(items) => {
                for item in items.iter().filter(|item| item.is_object()) {
                    result.record(item);
                }
            }
            Value::Object(_) => result.record(&data),
            _ => tracing::debug!("Skipping JSON-LD block that is not an object"),
        }
    }

    result
}
