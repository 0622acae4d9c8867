//! Gateway API controllers

pub mod health;
pub mod scan;

use std::sync::Arc;

use aegis_core::infrastructure::FixedWindowRateLimiter;
use aegis_llm::ScanTargetUseCase;

/// Application state for the gateway
#[derive(Clone)]
pub struct GatewayState {
    pub rate_limiter: FixedWindowRateLimiter,
    pub scan_use_case: Arc<ScanTargetUseCase>,
    /// Header carrying the caller address, set by the trusted proxy
    pub trusted_proxy_header: Arc<str>,
}

impl GatewayState {
    pub fn new(
        rate_limiter: FixedWindowRateLimiter,
        scan_use_case: Arc<ScanTargetUseCase>,
        trusted_proxy_header: &str,
    ) -> Self {
        Self {
            rate_limiter,
            scan_use_case,
            trusted_proxy_header: Arc::from(trusted_proxy_header.to_ascii_lowercase()),
        }
    }
}
