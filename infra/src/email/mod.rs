//! Email Module
//!
//! Rendering and delivery of OTP emails.
//!
//! ## Features
//!
//! - **Email Sender Trait**: Common interface for transports
//! - **Mock Implementation**: Records messages, optional console output
//! - **Template Rendering**: `${msg(...)}` and `${attribute}` placeholders
//! - **OTP Email Service**: Implements the core delivery trait
//! - **Security**: Addresses are masked in logs and codes are never logged

use std::sync::Arc;

use otp_shared::config::EmailConfig;

use crate::InfrastructureError;

pub mod email_sender;
pub mod mock_email;
pub mod otp_email;
pub mod template;

pub use email_sender::{EmailMessage, EmailSender};
pub use mock_email::MockEmailSender;
pub use otp_email::OtpEmailService;
pub use template::{MessageBundle, TemplateRenderer};


/// Create an email sender based on configuration
///
/// # Returns
///
/// * `Ok(Arc<dyn EmailSender>)` - The configured transport
/// * `Err(InfrastructureError::Config)` - Unknown provider
pub fn create_email_sender(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailSender>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => Ok(Arc::new(MockEmailSender::with_options(
            config.console_output,
            false,
        ))),
        other => Err(InfrastructureError::Config(format!(
            "Unsupported email provider: {}",
            other
        ))),
    }
}
