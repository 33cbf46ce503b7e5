//! Shared utilities and common types for the email OTP service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error codes and the response envelope
//! - Email address helpers (validation, masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DirectoryConfig, EmailConfig, Environment, LogFormat, LoggingConfig, OtpConfig, RateLimitConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, OtpResponse};
pub use utils::email;
