//! LLM Provider implementations
//!
//! - [`GoogleAIProvider`]: schema-enforced output with optional search grounding
//! - [`OpenAIProvider`]: OpenAI-compatible chat completions in JSON mode
//!
//! Both share the failure mapping below so that a given upstream status
//! always surfaces as the same [`LlmError`] variant.

pub mod google_ai;
pub mod openai;

use std::time::Duration;

use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use tracing::error;

pub use crate::domain::LlmProvider;
use crate::domain::LlmError;
pub use google_ai::GoogleAIProvider;
pub use openai::OpenAIProvider;

/// Upstream bodies are cut to this many characters before logging
pub const LOG_BODY_LIMIT: usize = 500;

/// Truncate an upstream body for logging, on a character boundary
pub fn truncate_for_log(body: &str) -> String {
    match body.char_indices().nth(LOG_BODY_LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Build an HTTP client whose requests give up after `timeout`
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
        Client::new()
    })
}

/// Map a non-2xx provider response to an error, logging status and body.
///
/// 401 is an authentication failure, 429 is upstream throttling, every other
/// status is a generic upstream error.
pub(crate) async fn error_from_response(
    provider: &'static str,
    response: reqwest::Response,
) -> LlmError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    let body = truncate_for_log(&response.text().await.unwrap_or_default());

    error!(
        provider,
        status = %status,
        retry_after = ?retry_after,
        body = %body,
        "Upstream provider returned an error"
    );

    match status.as_u16() {
        401 => LlmError::auth(body),
        429 => match retry_after {
            Some(seconds) => LlmError::rate_limited_with_retry(body, seconds),
            None => LlmError::rate_limited(body),
        },
        code => LlmError::upstream(code, body),
    }
}

/// Map a transport failure (no HTTP status) to an error, logging it
pub(crate) fn transport_error(
    provider: &'static str,
    err: reqwest::Error,
    timeout: Duration,
) -> LlmError {
    error!(provider, error = %err, "Upstream request failed before a response");
    if err.is_timeout() {
        LlmError::timeout(timeout.as_secs())
    } else {
        LlmError::from(err)
    }
}

/// Parse a 2xx body into the provider's wire type, or report it as malformed
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    provider: &'static str,
    body: &str,
) -> Result<T, LlmError> {
    serde_json::from_str(body).map_err(|e| {
        error!(
            provider,
            error = %e,
            preview = %truncate_for_log(body),
            "Upstream provider returned an unparseable body"
        );
        LlmError::malformed(format!("{} response: {}", provider, e))
    })
}
