//! Infrastructure Layer - Process-local state and external concerns

pub mod rate_limiter;

pub use rate_limiter::{FixedWindowRateLimiter, RateLimitResult};
