//! Scan request and findings domain

pub mod entities;
pub mod validation;
pub mod value_objects;

pub use entities::{Finding, ScanRequest, ScanResponse, ScanSettings, UNCLASSIFIED_CWE};
pub use validation::{MAX_TARGET_LENGTH, ScanValidationError, validate_scan_request};
pub use value_objects::{Severity, TargetType};
