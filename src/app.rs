//! Application setup and wiring

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio_util::sync::CancellationToken;

use aegis_core::Config;
use aegis_core::infrastructure::FixedWindowRateLimiter;
use aegis_gateway::{GatewayState, create_router};
use aegis_llm::ScanTargetUseCase;
use aegis_llm::infrastructure::{ProviderRegistry, ProviderResolver};

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Create the application router and return an AppHandle for shutdown coordination
pub fn create_app(config: Config) -> AppHandle {
    let registry = ProviderRegistry::new(&config.llm);
    create_app_with_resolver(config, Arc::new(registry))
}

/// Same as [`create_app`] with a caller-supplied provider resolver
pub fn create_app_with_resolver(
    config: Config,
    resolver: Arc<dyn ProviderResolver>,
) -> AppHandle {
    let shutdown_token = CancellationToken::new();

    let rate_limiter = FixedWindowRateLimiter::new(&config.rate_limit);
    if config.rate_limit.enabled && config.rate_limit.cleanup_interval_seconds > 0 {
        rate_limiter.spawn_cleanup_task(
            Duration::from_secs(config.rate_limit.cleanup_interval_seconds),
            shutdown_token.clone(),
        );
    }

    // The credential itself is read per request, so only the selection is logged here
    tracing::info!(
        provider = %config.llm.provider,
        max_requests = config.rate_limit.max_requests,
        window_seconds = config.rate_limit.window_seconds,
        "Scan gateway configured"
    );

    let scan_use_case = Arc::new(ScanTargetUseCase::new(resolver, config.llm.clone()));
    let state = GatewayState::new(
        rate_limiter,
        scan_use_case,
        &config.server.trusted_proxy_header,
    );

    AppHandle {
        router: create_router(state, &config),
        shutdown_token,
    }
}
