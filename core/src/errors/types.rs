//! Error types for the OTP workflow and the email subsystem.
//!
//! Every variant of [`OtpError`] is an expected outcome that callers map to a
//! response; none of them is fatal to the process.

use otp_shared::errors::error_codes;
use thiserror::Error;

use crate::domain::value_objects::{OtpOperation, VerifyRejection};

/// Caller-facing failures of the send and verify workflows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Email or userId is required")]
    MissingIdentifier,

    #[error("OTP code is required")]
    MissingCode,

    #[error("User not found")]
    IdentityNotFound,

    #[error("User does not have an email address")]
    NoEmail,

    #[error("Invalid client: {client_id}")]
    InvalidClient { client_id: String },

    #[error("Too many attempts for {operation}, try again later")]
    RateLimitExceeded { operation: OtpOperation },

    #[error("Failed to send OTP: {reason}")]
    DeliveryFailed { reason: String },

    #[error("Invalid or expired OTP code ({reason})")]
    InvalidCode { reason: VerifyRejection },
}

impl OtpError {
    /// Stable code surfaced to API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::MissingIdentifier => error_codes::MISSING_IDENTIFIER,
            OtpError::MissingCode => error_codes::MISSING_CODE,
            OtpError::IdentityNotFound => error_codes::USER_NOT_FOUND,
            OtpError::NoEmail => error_codes::NO_EMAIL,
            OtpError::InvalidClient { .. } => error_codes::INVALID_CLIENT,
            OtpError::RateLimitExceeded { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            OtpError::DeliveryFailed { .. } => error_codes::SEND_FAILED,
            OtpError::InvalidCode { .. } => error_codes::INVALID_CODE,
        }
    }
}

/// Failures of the email rendering and delivery subsystem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Recipient has no email address")]
    MissingRecipient,

    #[error("Failed to send OTP email: {0}")]
    Transport(String),
}
