//! Outcomes of OTP lifecycle transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation classes guarded by the rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpOperation {
    Send,
    Verify,
}

impl fmt::Display for OtpOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpOperation::Send => write!(f, "send"),
            OtpOperation::Verify => write!(f, "verify"),
        }
    }
}

/// Result of issuing a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// Code stored and handed to the email subsystem
    Sent { expires_at: DateTime<Utc> },
    /// Code stored but delivery failed; the stored code stays until it
    /// expires or is superseded
    DeliveryFailed { reason: String },
}

impl IssueOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, IssueOutcome::Sent { .. })
    }
}

/// Why a verification attempt was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyRejection {
    /// Candidate is not a well-formed code; nothing was read or changed
    InvalidFormat,
    /// No pending code for the identity
    NoActiveCode,
    /// Pending code expired (or its stored expiry was unreadable) and was purged
    Expired,
    /// Candidate differs from the pending code; the code is kept
    Mismatch,
}

impl fmt::Display for VerifyRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            VerifyRejection::InvalidFormat => "invalid code format",
            VerifyRejection::NoActiveCode => "no active code",
            VerifyRejection::Expired => "code expired",
            VerifyRejection::Mismatch => "code mismatch",
        };
        f.write_str(text)
    }
}

/// Result of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    Rejected(VerifyRejection),
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    pub fn rejection(&self) -> Option<VerifyRejection> {
        match self {
            VerifyOutcome::Verified => None,
            VerifyOutcome::Rejected(reason) => Some(*reason),
        }
    }
}
