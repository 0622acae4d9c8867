//! Findings normalization
//!
//! Turns raw model text into [`Finding`]s: strip fences, parse strictly,
//! fill gaps with fixed defaults, assign fallback ids and spread grounding
//! sources across findings. `codeFix` is passed through untouched.

use serde_json::{Map, Value};
use tracing::error;

use aegis_core::domain::{Finding, Severity, UNCLASSIFIED_CWE};

use crate::domain::LlmError;
use crate::infrastructure::providers::truncate_for_log;
use crate::infrastructure::response_parser::ResponseParser;

/// Prefix of generated finding ids
pub const FINDING_ID_PREFIX: &str = "AEGIS";

pub struct FindingsNormalizer;

impl FindingsNormalizer {
    /// Normalize raw model output into findings.
    ///
    /// Indexes refer to positions in the upstream `findings` array, so a
    /// skipped non-object item still consumes its id and source slot.
    ///
    /// `grounding_urls` is `Some` only for providers that report search
    /// sources. When it is non-empty, finding `i` receives
    /// `grounding_urls[i % len]` unless already referenced.
    pub fn normalize(
        raw_text: &str,
        grounding_urls: Option<&[String]>,
    ) -> Result<Vec<Finding>, LlmError> {
        let cleaned = ResponseParser::strip_code_fences(raw_text);

        let parsed: Value = serde_json::from_str(cleaned).map_err(|e| {
            error!(
                error = %e,
                preview = %truncate_for_log(cleaned),
                "Model output is not valid JSON"
            );
            LlmError::malformed(format!("Findings payload is not valid JSON: {}", e))
        })?;

        let items = match parsed.get("findings") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[][..],
        };

        let sources = grounding_urls.filter(|urls| !urls.is_empty());

        let findings = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.as_object().map(|item| (index, item)))
            .map(|(index, item)| {
                let mut finding = Self::finding_from_item(index, item);
                if let Some(urls) = sources {
                    push_unique(&mut finding.references, &urls[index % urls.len()]);
                }
                finding
            })
            .collect();

        Ok(findings)
    }

    fn finding_from_item(index: usize, item: &Map<String, Value>) -> Finding {
        let text = |key: &str| {
            item.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let non_empty = |key: &str| {
            item.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let mut references = Vec::new();
        if let Some(Value::Array(given)) = item.get("references") {
            for reference in given.iter().filter_map(Value::as_str) {
                push_unique(&mut references, reference);
            }
        }

        let id = match item.get("id") {
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => non_empty("id"),
        };

        Finding {
            id: id.unwrap_or_else(|| fallback_id(index)),
            title: text("title"),
            severity: Severity::from_label(
                item.get("severity")
                    .and_then(Value::as_str)
                    .unwrap_or_default(),
            ),
            category: text("category"),
            description: text("description"),
            location: text("location"),
            remediation: text("remediation"),
            code_fix: item
                .get("codeFix")
                .and_then(Value::as_str)
                .map(str::to_string),
            references,
            cwe_id: non_empty("cweId").unwrap_or_else(|| UNCLASSIFIED_CWE.to_string()),
        }
    }
}

/// `AEGIS-001` for index 0
pub fn fallback_id(index: usize) -> String {
    format!("{}-{:03}", FINDING_ID_PREFIX, index + 1)
}

fn push_unique(references: &mut Vec<String>, url: &str) {
    if !references.iter().any(|existing| existing == url) {
        references.push(url.to_string());
    }
}
