//! Mock Email Sender Implementation
//!
//! Records rendered messages instead of sending them. Used in development
//! and by tests that need to read the delivered code back.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use otp_shared::utils::email::{is_valid_email, mask_email};

use super::email_sender::{EmailMessage, EmailSender};
use crate::InfrastructureError;

/// Mock email transport for development and testing
///
/// This implementation:
/// - Validates recipient addresses
/// - Generates mock message ids
/// - Keeps every sent message for inspection
/// - Optionally prints messages to the console
#[derive(Clone)]
pub struct MockEmailSender {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Messages sent so far, oldest first
    outbox: Arc<Mutex<Vec<EmailMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockEmailSender {
    /// Create a new mock sender without console output
    pub fn new() -> Self {
        Self::with_options(false, false)
    }

    /// Create a mock sender with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// All messages sent so far
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent message sent to `to`
    pub fn last_message_to(&self, to: &str) -> Option<EmailMessage> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|message| message.to.eq_ignore_ascii_case(to))
            .cloned()
    }

    /// Clear recorded messages and the counter
    pub fn reset(&self) {
        self.message_count.store(0, Ordering::SeqCst);
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for MockEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if !is_valid_email(&message.to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid recipient address: {}",
                mask_email(&message.to)
            )));
        }

        let masked_to = mask_email(&message.to);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                "Mock email sender simulating failure for recipient: {}",
                masked_to
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL SENDER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("From: {}", message.from);
            println!("To: {}", masked_to);
            println!("Subject: {}", message.subject);
            println!("Message ID: {}", message_id);
            println!("{}", "-".repeat(60));
            println!("{}", message.text_body);
            println!("{}\n", "=".repeat(60));
        }

        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());

        info!(
            target: "email_service",
            provider = "mock",
            to = %masked_to,
            message_id = %message_id,
            "Email sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
