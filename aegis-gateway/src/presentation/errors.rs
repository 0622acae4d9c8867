//! Scan error taxonomy and its HTTP mapping
//!
//! Every variant except `Validation` answers with a fixed message. Whatever
//! detail a variant carries (upstream bodies, configuration problems) is
//! logged here and never leaves the process.

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};

use aegis_core::domain::ScanValidationError;
use aegis_llm::domain::LlmError;

use crate::presentation::models::ErrorResponse;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const UPSTREAM_RATE_LIMITED_MESSAGE: &str =
    "AI provider rate limit reached. Please try again later.";
pub const CONFIGURATION_MESSAGE: &str = "Server configuration error";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to complete scan with AI provider";
pub const MALFORMED_UPSTREAM_MESSAGE: &str = "AI provider returned malformed results";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Terminal outcome of a failed scan request
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("{0}")]
    Validation(String),

    #[error("rate limit exceeded, retry after {retry_after}s")]
    RateLimitExceeded {
        retry_after: u64,
        limit: u32,
        remaining: u32,
    },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("upstream authentication failed: {0}")]
    UpstreamAuth(String),

    #[error("upstream rate limited: {message}")]
    UpstreamRateLimited {
        retry_after: Option<u64>,
        message: String,
    },

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ScanError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScanError::Validation(_) => StatusCode::BAD_REQUEST,
            ScanError::RateLimitExceeded { .. } | ScanError::UpstreamRateLimited { .. } => {
                StatusCode::TOO_MANY_REQUESTS
            }
            ScanError::Configuration(_) | ScanError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ScanError::UpstreamAuth(_)
            | ScanError::Upstream(_)
            | ScanError::Transport(_)
            | ScanError::MalformedUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
            ScanError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Message the client sees
    pub fn public_message(&self) -> String {
        match self {
            ScanError::Validation(message) => message.clone(),
            ScanError::RateLimitExceeded { .. } => RATE_LIMITED_MESSAGE.to_string(),
            ScanError::UpstreamRateLimited { .. } => UPSTREAM_RATE_LIMITED_MESSAGE.to_string(),
            ScanError::Configuration(_) => CONFIGURATION_MESSAGE.to_string(),
            ScanError::UpstreamAuth(_) | ScanError::Upstream(_) | ScanError::Transport(_) => {
                UPSTREAM_FAILURE_MESSAGE.to_string()
            }
            ScanError::MalformedUpstreamResponse(_) => MALFORMED_UPSTREAM_MESSAGE.to_string(),
            ScanError::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            ScanError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl From<ScanValidationError> for ScanError {
    fn from(error: ScanValidationError) -> Self {
        ScanError::Validation(error.to_string())
    }
}

impl From<LlmError> for ScanError {
    fn from(error: LlmError) -> Self {
        match error {
            LlmError::Authentication(message) => ScanError::UpstreamAuth(message),
            LlmError::RateLimited {
                retry_after,
                message,
            } => ScanError::UpstreamRateLimited {
                retry_after,
                message,
            },
            LlmError::Upstream { status, message } => {
                ScanError::Upstream(format!("HTTP {}: {}", status, message))
            }
            e @ (LlmError::Network(_) | LlmError::Timeout { .. }) => {
                ScanError::Transport(e.to_string())
            }
            LlmError::Configuration(message) => ScanError::Configuration(message),
            e @ LlmError::ProviderNotFound(_) => ScanError::Configuration(e.to_string()),
            LlmError::MalformedResponse(message) => ScanError::MalformedUpstreamResponse(message),
        }
    }
}

impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Scan request failed");
        } else if matches!(self, ScanError::UpstreamRateLimited { .. }) {
            tracing::warn!(status = status.as_u16(), error = %self, "Scan rejected by AI provider");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Scan request rejected");
        }

        let body = Json(ErrorResponse::new(self.public_message()));
        let mut response = (status, body).into_response();

        if let ScanError::RateLimitExceeded {
            retry_after,
            limit,
            remaining,
        } = self
        {
            let headers = response.headers_mut();
            headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(limit));
            headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(remaining));
        }

        response
    }
}
