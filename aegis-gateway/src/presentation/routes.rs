//! Route definitions and server setup

use std::any::Any;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use aegis_core::Config;
use aegis_core::config::ServerConfig;
use aegis_core::domain::MAX_TARGET_LENGTH;

use crate::presentation::controllers::{
    GatewayState,
    health::health_check,
    scan::{method_not_allowed, scan_preflight, scan_target},
};
use crate::presentation::errors::ScanError;
use crate::presentation::middleware::logging_middleware;

/// Request body ceiling. A maximal target escaped as `\uXXXX` surrogate
/// pairs takes 12 bytes per character; the rest is room for the other fields.
pub const MAX_BODY_BYTES: usize = MAX_TARGET_LENGTH * 12 + 64 * 1024;

/// Turn a handler panic into the generic JSON 500
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    ScanError::Internal(detail).into_response()
}

/// Build the CORS layer from configuration.
///
/// `["*"]` answers with a wildcard origin; anything else is a fixed list.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let allow_origin = if server.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    })
                    .ok()
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Create the application router with its middleware stack
pub fn create_router(state: GatewayState, config: &Config) -> Router {
    let scan_routes = Router::new().route(
        "/api/scan",
        post(scan_target)
            .options(scan_preflight)
            .fallback(method_not_allowed),
    );

    let health_routes = Router::new().route("/health", get(health_check));

    let service_builder = ServiceBuilder::new()
        // HTTP tracing
        .layer(TraceLayer::new_for_http())
        // CORS handling, applied to error responses too
        .layer(cors_layer(&config.server))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_seconds),
        ))
        .layer(middleware::from_fn(logging_middleware))
        // Innermost, so a panic still gets logged and CORS headers
        .layer(CatchPanicLayer::custom(handle_panic));

    Router::new()
        .merge(scan_routes)
        .merge(health_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(service_builder)
        .with_state(state)
}
