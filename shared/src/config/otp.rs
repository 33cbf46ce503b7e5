//! One-time code configuration

use serde::{Deserialize, Serialize};

/// Widest code whose numeric range still fits in a `u64`
pub const MAX_CODE_LENGTH: usize = 18;

/// Longest accepted code lifetime (one week)
pub const MAX_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Code shape and lifetime
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    pub code_length: usize,

    /// Minutes a code stays valid after issuance
    pub ttl_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_minutes: 10,
        }
    }
}

impl OtpConfig {
    /// Lifetime as a chrono duration, saturated to `0..=MAX_TTL_MINUTES`
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.ttl_minutes.clamp(0, MAX_TTL_MINUTES))
    }

    /// Check code length and lifetime are within the supported range
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(format!(
                "otp.code_length must be between 1 and {}",
                MAX_CODE_LENGTH
            ));
        }
        if !(1..=MAX_TTL_MINUTES).contains(&self.ttl_minutes) {
            return Err(format!(
                "otp.ttl_minutes must be between 1 and {}",
                MAX_TTL_MINUTES
            ));
        }
        Ok(())
    }
}
