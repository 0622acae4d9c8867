//! Scan endpoint controller
//!
//! `POST /api/scan` runs: rate limit → parse → validate → scan → respond.
//! The rate limit is checked before the body is looked at, so a throttled
//! caller never reaches validation or the AI provider.
//!
//! Bodies past the router's size ceiling can only carry a target over the
//! length limit, so they are answered with that validation error.

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::Value;
use tracing::{info, warn};

use aegis_core::domain::{
    MAX_TARGET_LENGTH, ScanResponse, ScanValidationError, validate_scan_request,
};

use crate::presentation::controllers::GatewayState;
use crate::presentation::errors::ScanError;
use crate::presentation::middleware::client_identity;

/// POST /api/scan - Scan a target for security vulnerabilities
pub async fn scan_target(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ScanResponse>, ScanError> {
    let identity = client_identity(&headers, &state.trusted_proxy_header);

    let decision = state.rate_limiter.check(&identity).await;
    if !decision.allowed {
        warn!(
            identity = %identity,
            limit = decision.limit,
            retry_after = decision.retry_after_secs(),
            "Scan request rate limited"
        );
        return Err(ScanError::RateLimitExceeded {
            retry_after: decision.retry_after_secs(),
            limit: decision.limit,
            remaining: decision.remaining,
        });
    }

    let body = body.map_err(|rejection| {
        warn!(
            identity = %identity,
            status = rejection.status().as_u16(),
            error = %rejection.body_text(),
            "Scan request body could not be read"
        );
        let error = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ScanValidationError::TargetTooLong {
                max: MAX_TARGET_LENGTH,
            }
        } else {
            ScanValidationError::InvalidBody
        };
        ScanError::from(error)
    })?;

    let raw: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(identity = %identity, error = %e, "Scan request body is not valid JSON");
        ScanError::from(ScanValidationError::InvalidBody)
    })?;

    let request = validate_scan_request(&raw).map_err(|e| {
        warn!(identity = %identity, error = %e, "Scan request failed validation");
        ScanError::from(e)
    })?;

    info!(
        identity = %identity,
        target_type = %request.target_type,
        remaining = decision.remaining,
        "Scan request accepted"
    );

    let response = state.scan_use_case.execute(request).await?;

    Ok(Json(response))
}

/// OPTIONS /api/scan - Pre-flight without CORS request headers
pub async fn scan_preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /api/scan
pub async fn method_not_allowed() -> ScanError {
    ScanError::MethodNotAllowed
}
