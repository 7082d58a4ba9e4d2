//! schema.org JSON-LD validation

use crate::checks::{AuditCheck, AuditContext, CheckResult};
use serde_json::{json, Value};

const VALID_CONTEXTS: &[&str] = &["https://schema.org", "http://schema.org"];

/// Properties that may hold URLs
const URL_FIELDS: &[&str] = &["url", "sameAs", "logo", "image"];

/// Required properties per schema.org type (lowercase)
const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("website", &["@context", "@type", "url", "name"]),
    ("webpage", &["@context", "@type", "url", "name"]),
    ("organization", &["@context", "@type", "name", "url"]),
    ("person", &["@context", "@type", "name"]),
    ("faqpage", &["@context", "@type", "mainEntity"]),
    ("article", &["@context", "@type", "headline", "author"]),
    ("breadcrumblist", &["@context", "@type", "itemListElement"]),
    ("product", &["@context", "@type", "name", "description"]),
    ("localbusiness", &["@context", "@type", "name", "address"]),
    ("webapplication", &["@context", "@type", "name", "url"]),
];

/// Required properties for a type; unknown types only need `@context` and `@type`
pub fn required_fields(schema_type: &str) -> &'static [&'static str] {
    let wanted = schema_type.to_lowercase();
    REQUIRED_FIELDS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, fields)| *fields)
        .unwrap_or(&["@context", "@type"][..])
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

/// Validates one JSON-LD object
///
/// # Arguments
///
/// * `schema` - The parsed JSON-LD object
/// * `expected_type` - When given, the primary `@type` must match it
///   (case-insensitively) and the type's required properties must be present
///
/// # Returns
///
/// * `Ok(())` - The object is valid
/// * `Err(String)` - Description of the first problem found
pub fn validate_jsonld(schema: &Value, expected_type: Option<&str>) -> Result<(), String> {
    let Some(object) = schema.as_object() else {
        return Err("Schema must be an object".to_string());
    };

    match object.get("@context") {
        None => return Err("Missing required field: @context".to_string()),
        Some(context) if !is_truthy(context) => {
            return Err("Missing required field: @context".to_string())
        }
        Some(Value::String(context)) => {
            if !VALID_CONTEXTS.contains(&context.as_str()) {
                return Err(format!(
                    "@context must be 'https://schema.org', got '{}'",
                    context
                ));
            }
        }
        Some(Value::Array(items)) => {
            let first = items.first().and_then(Value::as_str).unwrap_or_default();
            if !VALID_CONTEXTS.contains(&first) {
                return Err(format!("@context[0] must be 'https://schema.org', got '{}'", first));
            }
        }
        Some(_) => return Err("@context must be a string or an array".to_string()),
    }

    let primary_type = match object.get("@type") {
        Some(Value::String(t)) if !t.is_empty() => t.clone(),
        Some(Value::Array(items)) if !items.is_empty() => match items[0].as_str() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err("@type is empty".to_string()),
        },
        _ => return Err("Missing required field: @type".to_string()),
    };

    if let Some(expected) = expected_type {
        if !primary_type.eq_ignore_ascii_case(expected) {
            return Err(format!("Expected @type '{}', got '{}'", expected, primary_type));
        }

        let missing: Vec<&str> = required_fields(expected)
            .iter()
            .copied()
            .filter(|field| !object.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "Missing required fields for {}: {}",
                primary_type,
                missing.join(", ")
            ));
        }
    }

    for field in URL_FIELDS {
        let values: Vec<&str> = match object.get(*field) {
            Some(Value::String(s)) if !s.is_empty() => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => continue,
        };
        for url in values {
            if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/')) {
                return Err(format!(
                    "Invalid URL format in '{}': '{}' (must start with http://, https://, or /)",
                    field, url
                ));
            }
        }
    }

    Ok(())
}

/// Validates every JSON-LD object on the homepage against schema.org rules
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidationCheck;

impl AuditCheck for SchemaValidationCheck {
    fn name(&self) -> &str {
        "schema_validation"
    }

    fn description(&self) -> &str {
        "Validates JSON-LD objects against schema.org required properties"
    }

    fn max_score(&self) -> u32 {
        10
    }

    fn run(&self, ctx: &AuditContext<'_>) -> CheckResult {
        let schemas = &ctx.schema.raw_schemas;
        if schemas.is_empty() {
            return CheckResult::failed(self, "No JSON-LD schema to validate");
        }

        let mut errors = Vec::new();
        for schema in schemas {
            let primary = match schema.get("@type") {
                Some(Value::String(t)) => Some(t.as_str()),
                Some(Value::Array(items)) => items.first().and_then(Value::as_str),
                _ => None,
            };
            if let Err(e) = validate_jsonld(schema, primary) {
                errors.push(json!({
                    "type": primary.unwrap_or("unknown"),
                    "error": e,
                }));
            }
        }

        let total = schemas.len() as u32;
        let valid = total - errors.len() as u32;
        let score = (self.max_score() * valid + total / 2) / total;
        let passed = errors.is_empty();

        CheckResult {
            name: self.name().to_string(),
            score,
            max_score: self.max_score(),
            passed,
            message: if passed {
                format!("All {} JSON-LD objects are valid", total)
            } else {
                format!("{} of {} JSON-LD objects have problems", errors.len(), total)
            },
            details: json!({
                "validated": total,
                "valid": valid,
                "errors": errors,
            }),
        }
    }
}
