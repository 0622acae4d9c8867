//! API response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned for every 4xx and 5xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Short, fixed, non-identifying message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: String,

    /// Current service version
    pub version: String,

    /// Health check timestamp
    pub timestamp: DateTime<Utc>,
}
