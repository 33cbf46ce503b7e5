//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer of the email OTP service.
//! It provides concrete implementations of the collaborators the core
//! consumes.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Identity**: in-memory realm directory and attribute store
//! - **Email**: template rendering, the OTP email service and transports
//! - **Services**: background maintenance (rate-window eviction)

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Identity module - realm directory and attribute side-table
pub mod identity;

/// Email module - rendering and delivery of OTP emails
pub mod email;

/// Services module - background infrastructure tasks
pub mod services;

pub use email::{create_email_sender, EmailSender, MockEmailSender, OtpEmailService};
pub use identity::InMemoryIdentityStore;
pub use services::{CleanupHandle, RateLimitCleanupTask};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email service error: {0}")]
    Email(String),

    /// Seed data could not be read or parsed
    #[error("Seed data error: {0}")]
    Seed(String),
}

impl From<std::io::Error> for InfrastructureError {
    fn from(err: std::io::Error) -> Self {
        InfrastructureError::Seed(err.to_string())
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::Seed(err.to_string())
    }
}
