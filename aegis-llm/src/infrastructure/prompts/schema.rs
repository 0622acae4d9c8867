//! Output schema declared to schema-enforcing providers

use serde_json::{Value, json};

use aegis_core::domain::Severity;

/// Fields every finding item must carry
pub const REQUIRED_FINDING_FIELDS: [&str; 7] = [
    "title",
    "severity",
    "category",
    "description",
    "location",
    "remediation",
    "cweId",
];

/// Schema of the `{ "findings": [...] }` object, in the OpenAPI subset
/// accepted by Gemini's `responseSchema`.
pub fn findings_schema() -> Value {
    let severities: Vec<&str> = Severity::ALL.iter().map(Severity::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "findings": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "severity": { "type": "STRING", "enum": severities },
                        "category": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "remediation": { "type": "STRING" },
                        "codeFix": { "type": "STRING", "nullable": true },
                        "references": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "cweId": { "type": "STRING" }
                    },
                    "required": REQUIRED_FINDING_FIELDS
                }
            }
        },
        "required": ["findings"]
    })
}
