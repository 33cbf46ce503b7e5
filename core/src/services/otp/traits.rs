//! Trait for the email delivery subsystem

use async_trait::async_trait;

use crate::domain::entities::identity::Identity;
use crate::errors::DeliveryError;

/// Delivers a freshly issued code to the identity's email address
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Render and send the OTP email
    ///
    /// # Arguments
    ///
    /// * `identity` - Recipient; its email address, name and realm feed the template
    /// * `code` - Plaintext code
    /// * `expiry_minutes` - Lifetime shown to the user
    async fn send_otp_email(
        &self,
        identity: &Identity,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<(), DeliveryError>;
}
