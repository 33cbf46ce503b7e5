//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Longest accepted window (one year)
pub const MAX_WINDOW_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Admission limits for the send and verify operations.
///
/// Both operation classes share a single fixed window per identifier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,

    /// Max code sends per identifier per window
    pub max_send_attempts: u32,

    /// Max verification attempts per identifier per window
    pub max_verify_attempts: u32,

    /// Window length in seconds
    pub window_seconds: u64,

    /// How often stale windows are evicted, in seconds
    pub cleanup_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_send_attempts: 5,
            max_verify_attempts: 10,
            window_seconds: 3600, // 1 hour
            cleanup_interval_seconds: 300,
        }
    }
}

impl RateLimitConfig {
    /// Window length as a chrono duration, saturated to `MAX_WINDOW_SECONDS`
    pub fn window(&self) -> chrono::Duration {
        let seconds = i64::try_from(self.window_seconds.min(MAX_WINDOW_SECONDS)).unwrap_or(0);
        chrono::Duration::seconds(seconds)
    }

    /// Check the window length is within the supported range
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_WINDOW_SECONDS).contains(&self.window_seconds) {
            return Err(format!(
                "rate_limit.window_seconds must be between 1 and {}",
                MAX_WINDOW_SECONDS
            ));
        }
        Ok(())
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            max_send_attempts: 20,
            max_verify_attempts: 50,
            ..Default::default()
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }

    /// Override the send limit
    pub fn with_max_send_attempts(mut self, max: u32) -> Self {
        self.max_send_attempts = max;
        self
    }

    /// Override the verify limit
    pub fn with_max_verify_attempts(mut self, max: u32) -> Self {
        self.max_verify_attempts = max;
        self
    }

    /// Override the window length
    pub fn with_window_seconds(mut self, seconds: u64) -> Self {
        self.window_seconds = seconds;
        self
    }
}
