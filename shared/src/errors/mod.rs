//! Shared error codes and error response structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error response used for failures outside the OTP envelope
/// (malformed JSON bodies, unknown routes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Stable error codes returned in the `errorCode` field
pub mod error_codes {
    pub const MISSING_IDENTIFIER: &str = "MISSING_IDENTIFIER";
    pub const MISSING_CODE: &str = "MISSING_CODE";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const NO_EMAIL: &str = "NO_EMAIL";
    pub const INVALID_CLIENT: &str = "INVALID_CLIENT";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const SEND_FAILED: &str = "SEND_FAILED";
    pub const INVALID_CODE: &str = "INVALID_CODE";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
