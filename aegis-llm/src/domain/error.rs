//! LLM-specific error types
//!
//! Every upstream failure is folded into one of these variants. The gateway
//! maps each variant onto a fixed client-facing message, so the strings held
//! here are for server-side logs only.

use std::fmt;

/// LLM operation error
#[derive(Debug)]
pub enum LlmError {
    /// Provider rejected the credential (HTTP 401)
    Authentication(String),

    /// Rate limited by the provider (HTTP 429)
    RateLimited {
        /// Seconds to wait before retrying, from `Retry-After` if provided
        retry_after: Option<u64>,
        /// Error message
        message: String,
    },

    /// Any other non-2xx response
    Upstream {
        /// HTTP status returned by the provider
        status: u16,
        /// Response body, truncated
        message: String,
    },

    /// Network/connection error
    Network(String),

    /// Request timed out
    Timeout {
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// Server-side configuration is missing or invalid (e.g. no API key)
    Configuration(String),

    /// 2xx response whose payload could not be understood
    MalformedResponse(String),

    /// Provider not supported or not configured
    ProviderNotFound(String),
}

impl LlmError {
    /// Check if this is a rate limit error
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    /// Transport-level failure: the request never produced an HTTP status
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Network(_) | LlmError::Timeout { .. })
    }

    /// Get retry-after duration if available
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            LlmError::RateLimited { retry_after, .. } => {
                retry_after.map(std::time::Duration::from_secs)
            }
            _ => None,
        }
    }

    /// Create a rate limited error
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            retry_after: None,
            message: message.into(),
        }
    }

    /// Create a rate limited error with retry duration
    pub fn rate_limited_with_retry(message: impl Into<String>, seconds: u64) -> Self {
        Self::RateLimited {
            retry_after: Some(seconds),
            message: message.into(),
        }
    }

    /// Create a generic upstream error
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            LlmError::RateLimited {
                message,
                retry_after,
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited: {} (retry after {}s)", message, secs)
                } else {
                    write!(f, "Rate limited: {}", message)
                }
            }
            LlmError::Upstream { status, message } => {
                write!(f, "Upstream error {}: {}", status, message)
            }
            LlmError::Network(msg) => write!(f, "Network error: {}", msg),
            LlmError::Timeout { seconds } => write!(f, "Request timed out after {}s", seconds),
            LlmError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            LlmError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            LlmError::ProviderNotFound(name) => write!(f, "Provider not found: {}", name),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout { seconds: 0 }
        } else if err.is_connect() {
            LlmError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            LlmError::MalformedResponse(err.to_string())
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::MalformedResponse(format!("JSON parse error: {}", err))
    }
}
