//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{DeliveryError, OtpError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Identity store error: {message}")]
    Store { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl DomainError {
    /// The caller-facing OTP error, if this is one
    pub fn as_otp(&self) -> Option<&OtpError> {
        match self {
            DomainError::Otp(err) => Some(err),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
