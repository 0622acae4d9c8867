//! Scan value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of target submitted for scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetType {
    /// Source code, analysed statically
    Code,
    /// A web application URL
    WebApp,
    /// A host, IP range or other network identifier
    Network,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Code => "CODE",
            TargetType::WebApp => "WEB_APP",
            TargetType::Network => "NETWORK",
        }
    }

    /// Targets that are only reachable through external lookups
    pub fn needs_external_intel(&self) -> bool {
        !matches!(self, TargetType::Code)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = ();

    /// Exact, case-sensitive match against the wire values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CODE" => Ok(TargetType::Code),
            "WEB_APP" => Ok(TargetType::WebApp),
            "NETWORK" => Ok(TargetType::Network),
            _ => Err(()),
        }
    }
}

/// Finding severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
        }
    }

    /// Lenient parse used on model output; unknown labels fall back to `Info`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
