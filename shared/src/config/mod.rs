//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `directory` - Source of the realm directory
//! - `email` - Delivery settings for OTP emails
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Code length and lifetime
//! - `rate_limit` - Send/verify admission windows
//! - `server` - HTTP server configuration

pub mod directory;
pub mod email;
pub mod environment;
pub mod otp;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use directory::DirectoryConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, MAX_CODE_LENGTH, MAX_TTL_MINUTES};
pub use rate_limit::{RateLimitConfig, MAX_WINDOW_SECONDS};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP code configuration
    pub otp: OtpConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Realm directory configuration
    pub directory: DirectoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
            directory: DirectoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::development(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
            directory: DirectoryConfig::default(),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::production(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
            directory: DirectoryConfig::default(),
        }
    }

    /// Preset for the given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load the preset for the environment named by `ENVIRONMENT`/`ENV`/`RUST_ENV`
    pub fn from_env() -> Self {
        Self::for_environment(Environment::from_env())
    }
}
