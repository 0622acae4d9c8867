//! Inbound scan request validation
//!
//! Works on the raw JSON body so that a missing target and a target of the
//! wrong type are both caught before deserialization. Rules run in a fixed
//! order and the first failing rule wins.

use serde_json::Value;

use super::entities::{ScanRequest, ScanSettings};
use super::value_objects::TargetType;

/// Maximum accepted target length, in characters
pub const MAX_TARGET_LENGTH: usize = 50_000;

/// First rule a scan request failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanValidationError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Target is required and must be a string")]
    MissingTarget,

    #[error("Target must not be empty")]
    EmptyTarget,

    #[error("Target exceeds maximum length of {max} characters")]
    TargetTooLong { max: usize },

    #[error("Invalid targetType. Must be CODE, WEB_APP, or NETWORK")]
    InvalidTargetType,
}

/// Validate a decoded JSON body and produce a typed request.
pub fn validate_scan_request(body: &Value) -> Result<ScanRequest, ScanValidationError> {
    let object = body.as_object().ok_or(ScanValidationError::InvalidBody)?;

    let target = object
        .get("target")
        .and_then(Value::as_str)
        .ok_or(ScanValidationError::MissingTarget)?;

    if target.trim().is_empty() {
        return Err(ScanValidationError::EmptyTarget);
    }

    if target.chars().count() > MAX_TARGET_LENGTH {
        return Err(ScanValidationError::TargetTooLong {
            max: MAX_TARGET_LENGTH,
        });
    }

    let target_type = object
        .get("targetType")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<TargetType>().ok())
        .ok_or(ScanValidationError::InvalidTargetType)?;

    Ok(ScanRequest {
        target: target.to_string(),
        target_type,
        settings: parse_settings(object.get("settings")),
    })
}

/// Toggles stay on unless explicitly `false`
fn parse_settings(raw: Option<&Value>) -> ScanSettings {
    let flag = |name: &str| {
        raw.and_then(|settings| settings.get(name))
            .and_then(Value::as_bool)
            != Some(false)
    };

    ScanSettings {
        deep_thinking: flag("deepThinking"),
        auto_remediation: flag("autoRemediation"),
    }
}
