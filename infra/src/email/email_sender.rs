//! Email transport trait

use async_trait::async_trait;
use serde::Serialize;

use crate::InfrastructureError;

/// A fully rendered message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    /// Formatted sender, `Name <address>`
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Transport that hands rendered messages to a mail system
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a message
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Provider message id
    /// * `Err(InfrastructureError)` - The transport refused or failed
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;

    /// Whether the transport is currently usable
    async fn is_available(&self) -> bool {
        true
    }
}
