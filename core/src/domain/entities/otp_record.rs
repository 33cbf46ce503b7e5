//! Pending one-time code entity for email verification.

use chrono::{DateTime, Duration, TimeZone, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a one-time code (10 minutes)
pub const DEFAULT_TTL_MINUTES: i64 = 10;

/// Attribute key holding the pending code
pub const ATTR_OTP_CODE: &str = "otp_code";

/// Attribute key holding the expiry, as epoch milliseconds
pub const ATTR_OTP_EXPIRY: &str = "otp_expiry";

/// The single outstanding code of an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// The numeric code, kept as a string so leading zeros survive
    pub code: String,

    /// Instant after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record for a freshly generated code
    ///
    /// The expiry is truncated to millisecond precision so that the record
    /// equals what a store round-trip of [`OtpRecord::expiry_attribute`]
    /// produces.
    ///
    /// # Arguments
    ///
    /// * `code` - The generated code
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the code
    pub fn issue(code: String, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = issued_at + ttl;
        let expires_at = Utc
            .timestamp_millis_opt(expires_at.timestamp_millis())
            .single()
            .unwrap_or(expires_at);

        Self { code, expires_at }
    }

    /// Rebuilds a record from its stored attribute values
    ///
    /// # Returns
    ///
    /// `None` when the expiry is not a valid epoch-millisecond timestamp
    pub fn from_attributes(code: String, expiry: &str) -> Option<Self> {
        let expires_at = Self::parse_expiry(expiry)?;
        Some(Self { code, expires_at })
    }

    /// Parses an epoch-millisecond expiry string
    pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
        let millis = raw.trim().parse::<i64>().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Expiry in its stored form (epoch milliseconds)
    pub fn expiry_attribute(&self) -> String {
        self.expires_at.timestamp_millis().to_string()
    }

    /// Whether the record has expired at `now`.
    ///
    /// The expiry instant itself is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares a candidate against the stored code in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        if self.code.len() != candidate.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Time left until expiry, or zero when already expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
