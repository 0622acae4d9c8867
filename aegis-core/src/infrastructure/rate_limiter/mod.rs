//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting keyed by caller identity. State lives in
//! process memory only and is lost on restart; replicas do not share quota.

pub mod fixed_window;
pub mod types;

pub use fixed_window::FixedWindowRateLimiter;
pub use types::{Clock, ManualClock, RateLimitEntry, RateLimitResult, SystemClock};
