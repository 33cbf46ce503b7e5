//! OTP email service
//!
//! Implements the core delivery trait by rendering the OTP templates and
//! handing the result to an [`EmailSender`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use otp_core::domain::entities::identity::Identity;
use otp_core::errors::DeliveryError;
use otp_core::services::EmailServiceTrait;
use otp_shared::config::EmailConfig;
use otp_shared::utils::email::mask_email;

use super::email_sender::{EmailMessage, EmailSender};
use super::template::TemplateRenderer;

const TEXT_TEMPLATE: &str = include_str!("templates/email-otp.txt");
const HTML_TEMPLATE: &str = include_str!("templates/email-otp.html");
const SUBJECT_KEY: &str = "emailOtpSubject";

/// Renders and sends OTP emails
pub struct OtpEmailService {
    sender: Arc<dyn EmailSender>,
    renderer: TemplateRenderer,
    from: String,
    company_name: String,
}

impl OtpEmailService {
    pub fn new(sender: Arc<dyn EmailSender>, config: &EmailConfig) -> Self {
        Self {
            sender,
            renderer: TemplateRenderer::default(),
            from: format!("{} <{}>", config.from_display_name, config.from_address),
            company_name: config.company_name.clone(),
        }
    }

    pub fn with_renderer(mut self, renderer: TemplateRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Template attributes for one message
    fn attributes(&self, identity: &Identity, code: &str, expiry_minutes: i64) -> HashMap<String, String> {
        let mut attributes = HashMap::new();
        attributes.insert("otpCode".to_string(), code.to_string());
        attributes.insert("expiryMinutes".to_string(), expiry_minutes.to_string());
        attributes.insert("userName".to_string(), identity.display_name().to_string());
        attributes.insert("realmName".to_string(), identity.realm.label().to_string());
        attributes.insert("companyName".to_string(), self.company_name.clone());
        attributes
    }

    /// Render the full message for an identity
    pub fn render(
        &self,
        identity: &Identity,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<EmailMessage, DeliveryError> {
        let to = identity
            .email_address()
            .ok_or(DeliveryError::MissingRecipient)?;

        let attributes = self.attributes(identity, code, expiry_minutes);
        Ok(EmailMessage {
            from: self.from.clone(),
            to: to.to_string(),
            subject: self.renderer.subject(SUBJECT_KEY),
            text_body: self.renderer.render(TEXT_TEMPLATE, &attributes),
            html_body: self.renderer.render_html(HTML_TEMPLATE, &attributes),
        })
    }
}

#[async_trait]
impl EmailServiceTrait for OtpEmailService {
    async fn send_otp_email(
        &self,
        identity: &Identity,
        code: &str,
        expiry_minutes: i64,
    ) -> Result<(), DeliveryError> {
        let message = self.render(identity, code, expiry_minutes)?;
        let masked_to = mask_email(&message.to);

        match self.sender.send_email(&message).await {
            Ok(message_id) => {
                tracing::info!(
                    provider = self.sender.provider_name(),
                    to = %masked_to,
                    message_id = %message_id,
                    identity_id = %identity.id,
                    "OTP email sent"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    provider = self.sender.provider_name(),
                    to = %masked_to,
                    error = %e,
                    "Failed to send OTP email"
                );
                Err(DeliveryError::Transport(e.to_string()))
            }
        }
    }
}
