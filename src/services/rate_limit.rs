//! Fixed-window rate limiting
//!
//! Limits how often one fingerprint (user id) may save video metadata:
//! at most `max_per_window` saves within one window. Counters reset when
//! the window elapses.

use crate::config::RateLimitConfig;
use crate::error::{AppError, AppResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct WindowSlot {
    started: Instant,
    count: u32,
}

/// Per-fingerprint fixed-window limiter.
pub struct FixedWindowLimiter {
    window: Duration,
    max_per_window: u32,
    slots: Mutex<HashMap<String, WindowSlot>>,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, max_per_window: u32) -> Self {
        Self {
            window,
            max_per_window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(
            Duration::from_secs(config.window_secs),
            config.max_per_window,
        )
    }

    /// Check and consume one unit for the fingerprint.
    ///
    /// Returns `RateLimitExceeded` when the fingerprint already used its
    /// budget inside the current window.
    pub fn check(&self, fingerprint: &str) -> AppResult<()> {
        let mut slots = self.slots.lock();
        let now = Instant::now();

        let slot = slots
            .entry(fingerprint.to_string())
            .or_insert(WindowSlot { started: now, count: 0 });

        if now.duration_since(slot.started) >= self.window {
            slot.started = now;
            slot.count = 0;
        }

        if slot.count >= self.max_per_window {
            tracing::warn!("Rate limit exceeded for fingerprint {}", fingerprint);
            return Err(AppError::RateLimitExceeded);
        }

        slot.count += 1;
        Ok(())
    }
}
