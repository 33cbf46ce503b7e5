//! Application state shared by the handlers

use std::sync::Arc;

use otp_core::repositories::{AttributeStore, IdentityDirectory};
use otp_core::services::{
    EmailServiceTrait, OtpService, RateLimiter, RateLimiterTrait, VerificationWorkflow,
};
use otp_infra::{EmailSender, InMemoryIdentityStore, OtpEmailService};
use otp_shared::config::AppConfig;

/// Shared services handed to every handler
pub struct AppState<D, A, E, L>
where
    D: IdentityDirectory,
    A: AttributeStore,
    E: EmailServiceTrait,
    L: RateLimiterTrait,
{
    pub workflow: Arc<VerificationWorkflow<D, A, E, L>>,
    /// Name used in the health message
    pub company_name: String,
}

impl<D, A, E, L> AppState<D, A, E, L>
where
    D: IdentityDirectory,
    A: AttributeStore,
    E: EmailServiceTrait,
    L: RateLimiterTrait,
{
    pub fn new(workflow: Arc<VerificationWorkflow<D, A, E, L>>, company_name: impl Into<String>) -> Self {
        Self {
            workflow,
            company_name: company_name.into(),
        }
    }
}

/// State wired with the in-memory directory and template-based email
pub type DefaultAppState =
    AppState<InMemoryIdentityStore, InMemoryIdentityStore, OtpEmailService, RateLimiter>;

/// Wire the default collaborators from configuration
///
/// The store serves both as identity directory and attribute store.
pub fn build_state(
    config: &AppConfig,
    store: Arc<InMemoryIdentityStore>,
    sender: Arc<dyn EmailSender>,
    rate_limiter: Arc<RateLimiter>,
) -> DefaultAppState {
    let email_service = Arc::new(OtpEmailService::new(sender, &config.email));
    let otp_service = Arc::new(OtpService::new(
        store.clone(),
        email_service,
        config.otp.clone(),
    ));
    let workflow = Arc::new(VerificationWorkflow::new(store, otp_service, rate_limiter));

    AppState::new(workflow, config.email.company_name.clone())
}
