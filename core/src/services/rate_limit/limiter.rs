//! In-process rate limiter
//!
//! One [`RateWindow`] per identifier, each behind its own mutex so that
//! admission of different identifiers never contends. The map lock is only
//! held long enough to find or insert an entry; cleanup is the only place
//! that holds it while locking entries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use otp_shared::config::RateLimitConfig;

use crate::domain::value_objects::OtpOperation;
use crate::services::clock::{Clock, SystemClock};

use super::rate_limiter::RateLimiterTrait;
use super::window::{RateWindow, WindowSnapshot};

type WindowEntry = Arc<Mutex<RateWindow>>;

/// Fixed-window rate limiter keyed by identifier
pub struct RateLimiter {
    windows: RwLock<HashMap<String, WindowEntry>>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a rate limiter on the given clock
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            config,
            clock,
        }
    }

    /// Create a rate limiter on the system clock
    pub fn with_system_clock(config: RateLimitConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Number of identifiers currently tracked
    pub fn window_count(&self) -> usize {
        self.windows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Current counters of an identifier, if it is tracked
    pub fn snapshot(&self, identifier: &str) -> Option<WindowSnapshot> {
        let entry = self
            .windows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(identifier)
            .cloned()?;
        let window = entry.lock().unwrap_or_else(PoisonError::into_inner);
        Some(window.snapshot())
    }

    fn limit_for(&self, operation: OtpOperation) -> u32 {
        match operation {
            OtpOperation::Send => self.config.max_send_attempts,
            OtpOperation::Verify => self.config.max_verify_attempts,
        }
    }

    /// Find the identifier's window, creating it on first use
    fn entry(&self, identifier: &str) -> WindowEntry {
        if let Some(entry) = self
            .windows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(identifier)
        {
            return entry.clone();
        }

        let mut windows = self.windows.write().unwrap_or_else(PoisonError::into_inner);
        windows
            .entry(identifier.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(RateWindow::new(self.clock.now()))))
            .clone()
    }

    fn admit(&self, operation: OtpOperation, identifier: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        let max = self.limit_for(operation);
        let window_length = self.config.window();

        loop {
            let entry = self.entry(identifier);
            let mut window = entry.lock().unwrap_or_else(PoisonError::into_inner);
            if window.is_retired() {
                // Evicted between lookup and lock; retry against a fresh entry
                continue;
            }

            let admitted = window.try_admit(operation, max, self.clock.now(), window_length);
            if !admitted {
                tracing::warn!(
                    identifier = identifier,
                    operation = %operation,
                    limit = max,
                    event = "rate_limit_exceeded",
                    "Rate limit exceeded"
                );
            }
            return admitted;
        }
    }
}

impl RateLimiterTrait for RateLimiter {
    fn allow_send(&self, identifier: &str) -> bool {
        self.admit(OtpOperation::Send, identifier)
    }

    fn allow_verify(&self, identifier: &str) -> bool {
        self.admit(OtpOperation::Verify, identifier)
    }

    fn cleanup(&self) -> usize {
        let now = self.clock.now();
        let window_length = self.config.window();

        let mut windows = self.windows.write().unwrap_or_else(PoisonError::into_inner);
        let before = windows.len();
        windows.retain(|_, entry| {
            let mut window = entry.lock().unwrap_or_else(PoisonError::into_inner);
            if window.is_expired(now, window_length) {
                window.retire();
                false
            } else {
                true
            }
        });
        let removed = before - windows.len();

        if removed > 0 {
            tracing::debug!(
                removed = removed,
                remaining = windows.len(),
                event = "rate_limit_cleanup",
                "Evicted expired rate windows"
            );
        }
        removed
    }
}
