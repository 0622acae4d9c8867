//! Scan entities exchanged with the dashboard

use serde::{Deserialize, Serialize};

use super::value_objects::{Severity, TargetType};

/// Fallback CWE identifier for findings the model did not classify
pub const UNCLASSIFIED_CWE: &str = "N/A";

/// User toggles that shape the generated request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSettings {
    /// Ask the provider for extended reasoning where supported
    pub deep_thinking: bool,
    /// Ask the model for concrete fix content per finding
    pub auto_remediation: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            deep_thinking: true,
            auto_remediation: true,
        }
    }
}

/// A validated scan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub target: String,
    pub target_type: TargetType,
    #[serde(default)]
    pub settings: ScanSettings,
}

/// One reported vulnerability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub category: String,
    pub description: String,
    pub location: String,
    pub remediation: String,
    /// Concrete fix, present only when auto-remediation was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_fix: Option<String>,
    /// Corroborating sources, deduplicated in first-seen order
    #[serde(default)]
    pub references: Vec<String>,
    pub cwe_id: String,
}

/// Body of a successful scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScanResponse {
    pub findings: Vec<Finding>,
}

impl ScanResponse {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }
}
