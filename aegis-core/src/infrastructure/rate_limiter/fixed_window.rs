//! Fixed Window Rate Limiter
//!
//! Each identity gets a quota of `max_requests` per window. The window opens
//! on the first request from an identity and is replaced by a fresh one on
//! the first request after it has elapsed. Rejected requests do not touch
//! the stored state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::types::{Clock, RateLimitEntry, RateLimitResult, SystemClock};
use crate::config::RateLimitConfig;

/// Process-local per-identity rate limiter
#[derive(Clone)]
pub struct FixedWindowRateLimiter {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
    clock: Arc<dyn Clock>,
    max_requests: u32,
    window: Duration,
    enabled: bool,
}

impl FixedWindowRateLimiter {
    /// Create a limiter backed by the system clock
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a limiter with a custom clock (for testing)
    pub fn with_clock(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
            max_requests: config.max_requests,
            window: config.window(),
            enabled: config.enabled,
        }
    }

    /// Admit or reject one request from `identity`, returning the window state.
    ///
    /// The whole read-check-increment runs under one lock so two concurrent
    /// requests cannot both take the last slot.
    pub async fn check(&self, identity: &str) -> RateLimitResult {
        if !self.enabled {
            return RateLimitResult::allowed(self.max_requests, self.max_requests, Duration::ZERO);
        }

        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get_mut(identity)
            && !entry.is_expired(now)
        {
            let reset_after = entry.window_reset_at.saturating_duration_since(now);
            if entry.count >= self.max_requests {
                debug!(identity = %identity, count = entry.count, "Rate limit window exhausted");
                return RateLimitResult::blocked(self.max_requests, reset_after);
            }
            entry.count += 1;
            return RateLimitResult::allowed(
                self.max_requests,
                self.max_requests - entry.count,
                reset_after,
            );
        }

        // First sight, or the previous window has elapsed
        entries.insert(identity.to_string(), RateLimitEntry::open(now, self.window));
        RateLimitResult::allowed(
            self.max_requests,
            self.max_requests.saturating_sub(1),
            self.window,
        )
    }

    /// Whether a request from `identity` is admitted
    pub async fn allow(&self, identity: &str) -> bool {
        self.check(identity).await.allowed
    }

    /// Drop entries whose window has elapsed. Returns the number removed.
    ///
    /// An elapsed entry is replaced on the next request anyway, so removing
    /// it never changes an admission decision.
    pub async fn cleanup(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of identities currently tracked
    pub async fn tracked_identities(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Spawn the periodic sweep of elapsed entries
    pub fn spawn_cleanup_task(
        &self,
        interval: Duration,
        shutdown_token: CancellationToken,
    ) -> JoinHandle<()> {
        let limiter = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = limiter.cleanup().await;
                        if removed > 0 {
                            let tracked = limiter.tracked_identities().await;
                            debug!(removed, tracked, "Swept elapsed rate limit windows");
                        }
                    }
                    _ = shutdown_token.cancelled() => {
                        info!("Rate limit sweep shutting down");
                        return;
                    }
                }
            }
        })
    }
}
