//! Verification workflow implementation

use std::sync::Arc;

use otp_shared::utils::email::mask_email;

use crate::domain::entities::identity::{Identity, IdentityLookup};
use crate::domain::value_objects::{IssueOutcome, OtpOperation, VerifyOutcome};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::{AttributeStore, IdentityDirectory};
use crate::services::otp::{EmailServiceTrait, OtpService};
use crate::services::rate_limit::RateLimiterTrait;

use super::types::{SendCodeCommand, SendCodeResult, VerifyCodeCommand, VerifyCodeResult};

/// Send and verify workflows over a realm directory
pub struct VerificationWorkflow<D, A, E, L>
where
    D: IdentityDirectory,
    A: AttributeStore,
    E: EmailServiceTrait,
    L: RateLimiterTrait,
{
    directory: Arc<D>,
    otp_service: Arc<OtpService<A, E>>,
    rate_limiter: Arc<L>,
}

impl<D, A, E, L> VerificationWorkflow<D, A, E, L>
where
    D: IdentityDirectory,
    A: AttributeStore,
    E: EmailServiceTrait,
    L: RateLimiterTrait,
{
    /// Create a new workflow
    ///
    /// # Arguments
    ///
    /// * `directory` - Realm directory used to resolve identities and clients
    /// * `otp_service` - Lifecycle manager
    /// * `rate_limiter` - Admission control shared by both operations
    pub fn new(directory: Arc<D>, otp_service: Arc<OtpService<A, E>>, rate_limiter: Arc<L>) -> Self {
        Self {
            directory,
            otp_service,
            rate_limiter,
        }
    }

    pub fn otp_service(&self) -> &Arc<OtpService<A, E>> {
        &self.otp_service
    }

    /// Admit a send attempt for an identifier
    pub fn admit_send(&self, identifier: &str) -> bool {
        self.rate_limiter.allow_send(identifier)
    }

    /// Admit a verify attempt for an identifier
    pub fn admit_verify(&self, identifier: &str) -> bool {
        self.rate_limiter.allow_verify(identifier)
    }

    /// Issue a code to the identity named by the command
    ///
    /// Checks run in order: identifier present, identity exists, identity
    /// has an email address, send admission, client validity. Only then is
    /// a code issued.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code stored and delivered
    /// * `Err(DomainError::Otp(..))` - A caller-facing rejection
    /// * `Err(DomainError)` - A collaborator failed
    pub async fn send_code(&self, command: SendCodeCommand) -> DomainResult<SendCodeResult> {
        let lookup = IdentityLookup::from_parts(command.email.as_deref(), command.user_id.as_deref())
            .ok_or(OtpError::MissingIdentifier)?;

        let identity = self.resolve(&command.realm, &lookup).await?;

        let email = identity
            .email_address()
            .map(str::to_string)
            .ok_or(OtpError::NoEmail)?;

        self.admit(OtpOperation::Send, &identity)?;
        self.check_client(&command.realm, command.client_id.as_deref())
            .await?;

        match self.otp_service.issue_code(&identity).await? {
            IssueOutcome::Sent { expires_at } => Ok(SendCodeResult {
                identity_id: identity.id,
                masked_email: mask_email(&email),
                expires_at,
            }),
            IssueOutcome::DeliveryFailed { reason } => {
                Err(OtpError::DeliveryFailed { reason }.into())
            }
        }
    }

    /// Verify a code for the identity named by the command
    ///
    /// A missing or empty code is rejected before the directory is
    /// consulted; badly formed codes, whitespace included, still count
    /// against the verify window.
    pub async fn verify_code(&self, command: VerifyCodeCommand) -> DomainResult<VerifyCodeResult> {
        let lookup = IdentityLookup::from_parts(command.email.as_deref(), command.user_id.as_deref())
            .ok_or(OtpError::MissingIdentifier)?;

        let code = command
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or(OtpError::MissingCode)?;

        let identity = self.resolve(&command.realm, &lookup).await?;

        self.admit(OtpOperation::Verify, &identity)?;
        self.check_client(&command.realm, command.client_id.as_deref())
            .await?;

        match self.otp_service.verify_code(&identity, code).await? {
            VerifyOutcome::Verified => Ok(VerifyCodeResult {
                identity_id: identity.id,
            }),
            VerifyOutcome::Rejected(reason) => Err(OtpError::InvalidCode { reason }.into()),
        }
    }

    async fn resolve(&self, realm: &str, lookup: &IdentityLookup) -> DomainResult<Identity> {
        match self.directory.find_identity(realm, lookup).await? {
            Some(identity) => Ok(identity),
            None => {
                let by = match lookup {
                    IdentityLookup::ById(_) => "id",
                    IdentityLookup::ByEmail(_) => "email",
                };
                tracing::info!(
                    realm = realm,
                    lookup = by,
                    event = "identity_not_found",
                    "Identity not found"
                );
                Err(OtpError::IdentityNotFound.into())
            }
        }
    }

    fn admit(&self, operation: OtpOperation, identity: &Identity) -> DomainResult<()> {
        if self.rate_limiter.allow(operation, &identity.id) {
            Ok(())
        } else {
            Err(OtpError::RateLimitExceeded { operation }.into())
        }
    }

    async fn check_client(&self, realm: &str, client_id: Option<&str>) -> DomainResult<()> {
        let client_id = match client_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(client_id) => client_id,
            None => return Ok(()),
        };

        match self.directory.find_client(realm, client_id).await? {
            Some(client) if client.enabled => Ok(()),
            _ => {
                tracing::warn!(
                    realm = realm,
                    client_id = client_id,
                    event = "invalid_client",
                    "Unknown or disabled client"
                );
                Err(OtpError::InvalidClient {
                    client_id: client_id.to_string(),
                }
                .into())
            }
        }
    }
}
