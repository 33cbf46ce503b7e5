//! API response envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope returned by every OTP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable outcome
    pub message: String,

    /// Machine-readable failure code (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl OtpResponse {
    /// Create a successful response
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_code: None,
        }
    }

    /// Create a failed response carrying an error code
    pub fn failure(message: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_code: Some(error_code.into()),
        }
    }
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: String::from("healthy"),
            service: service.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_omits_error_code() {
        let json = serde_json::to_string(&OtpResponse::success("OTP sent")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"OTP sent"}"#);
    }

    #[test]
    fn test_failure_uses_camel_case() {
        let json =
            serde_json::to_string(&OtpResponse::failure("User not found", "USER_NOT_FOUND"))
                .unwrap();
        assert!(json.contains(r#""errorCode":"USER_NOT_FOUND""#));
        assert!(json.contains(r#""success":false"#));
    }
}
