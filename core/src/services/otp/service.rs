//! OTP lifecycle manager
//!
//! States per identity: no active code, pending, and the terminal outcomes
//! (verified, expired, superseded) which all collapse back to "no active
//! code". The record lives in the identity's attribute side-table under
//! `otp_code` / `otp_expiry`; this service is its only writer.

use std::sync::Arc;

use otp_shared::config::OtpConfig;
use otp_shared::utils::email::mask_email;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::otp_record::{OtpRecord, ATTR_OTP_CODE, ATTR_OTP_EXPIRY};
use crate::domain::value_objects::{IssueOutcome, VerifyOutcome, VerifyRejection};
use crate::errors::DomainResult;
use crate::repositories::AttributeStore;
use crate::services::clock::{Clock, SystemClock};

use super::generator::CodeGenerator;
use super::traits::EmailServiceTrait;

/// Issues, verifies and invalidates one-time codes
pub struct OtpService<A: AttributeStore, E: EmailServiceTrait> {
    /// Side-table the pending record is persisted in
    store: Arc<A>,
    /// Delivery subsystem
    email_service: Arc<E>,
    generator: CodeGenerator,
    config: OtpConfig,
    clock: Arc<dyn Clock>,
}

impl<A: AttributeStore, E: EmailServiceTrait> OtpService<A, E> {
    /// Create a new OTP service on the system clock
    ///
    /// # Arguments
    ///
    /// * `store` - Attribute store holding pending records
    /// * `email_service` - Delivery subsystem
    /// * `config` - Code length and lifetime
    pub fn new(store: Arc<A>, email_service: Arc<E>, config: OtpConfig) -> Self {
        Self::with_clock(store, email_service, config, Arc::new(SystemClock))
    }

    /// Create a new OTP service on an injected clock
    pub fn with_clock(
        store: Arc<A>,
        email_service: Arc<E>,
        config: OtpConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            email_service,
            generator: CodeGenerator::new(config.code_length),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    pub fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// Issue a fresh code to the identity
    ///
    /// The new record unconditionally replaces any pending one, then the
    /// code is handed to the email subsystem. A delivery failure is reported
    /// as [`IssueOutcome::DeliveryFailed`] and leaves the stored record in
    /// place until it expires or is superseded.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Whether delivery succeeded
    /// * `Err(DomainError)` - The attribute store failed; no half-written
    ///   record is left behind
    pub async fn issue_code(&self, identity: &Identity) -> DomainResult<IssueOutcome> {
        let record = OtpRecord::issue(
            self.generator.generate(),
            self.clock.now(),
            self.config.ttl(),
        );

        // Expiry first: a failed write leaves the previous record intact
        self.store
            .set_attribute(&identity.id, ATTR_OTP_EXPIRY, &record.expiry_attribute())
            .await?;
        if let Err(e) = self
            .store
            .set_attribute(&identity.id, ATTR_OTP_CODE, &record.code)
            .await
        {
            // The old code is now paired with the new expiry; drop both
            if let Err(clear_err) = self.clear(identity).await {
                tracing::warn!(
                    identity_id = %identity.id,
                    error = %clear_err,
                    "Failed to discard partially written code"
                );
            }
            return Err(e);
        }

        tracing::info!(
            identity_id = %identity.id,
            realm = %identity.realm.name,
            code_length = record.code.len(),
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued one-time code"
        );

        match self
            .email_service
            .send_otp_email(identity, &record.code, self.config.ttl_minutes)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    identity_id = %identity.id,
                    email = %identity.email_address().map(mask_email).unwrap_or_default(),
                    event = "otp_sent",
                    "One-time code delivered"
                );
                Ok(IssueOutcome::Sent {
                    expires_at: record.expires_at,
                })
            }
            Err(e) => {
                tracing::error!(
                    identity_id = %identity.id,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver one-time code"
                );
                Ok(IssueOutcome::DeliveryFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Verify a candidate code for the identity
    ///
    /// Badly formed candidates are rejected before the store is read.
    /// Expired or unreadable records are purged. A wrong code keeps the
    /// record; the right one marks the email verified and consumes it.
    pub async fn verify_code(
        &self,
        identity: &Identity,
        candidate: &str,
    ) -> DomainResult<VerifyOutcome> {
        if !self.generator.is_valid_format(candidate) {
            tracing::debug!(
                identity_id = %identity.id,
                event = "otp_invalid_format",
                "Rejected badly formed code"
            );
            return Ok(VerifyOutcome::Rejected(VerifyRejection::InvalidFormat));
        }

        let (code, expiry) = self.read_record(&identity.id).await?;
        let (code, expiry) = match (code, expiry) {
            (Some(code), Some(expiry)) => (code, expiry),
            _ => {
                tracing::debug!(
                    identity_id = %identity.id,
                    event = "otp_not_found",
                    "No pending code"
                );
                return Ok(VerifyOutcome::Rejected(VerifyRejection::NoActiveCode));
            }
        };

        let record = match OtpRecord::from_attributes(code, &expiry) {
            Some(record) => record,
            None => {
                tracing::warn!(
                    identity_id = %identity.id,
                    event = "otp_expiry_malformed",
                    "Stored expiry is unreadable, discarding code"
                );
                self.clear(identity).await?;
                return Ok(VerifyOutcome::Rejected(VerifyRejection::Expired));
            }
        };

        if record.is_expired_at(self.clock.now()) {
            tracing::info!(
                identity_id = %identity.id,
                event = "otp_expired",
                "Pending code expired"
            );
            self.clear(identity).await?;
            return Ok(VerifyOutcome::Rejected(VerifyRejection::Expired));
        }

        if !record.matches(candidate) {
            tracing::warn!(
                identity_id = %identity.id,
                event = "otp_mismatch",
                "Code mismatch"
            );
            return Ok(VerifyOutcome::Rejected(VerifyRejection::Mismatch));
        }

        self.store.set_email_verified(&identity.id, true).await?;
        self.clear(identity).await?;

        tracing::info!(
            identity_id = %identity.id,
            event = "otp_verified",
            "Email verified"
        );

        Ok(VerifyOutcome::Verified)
    }

    /// Whether the identity has a code that is still valid now
    ///
    /// Unreadable expiry data counts as no pending code and is left for the
    /// next verification to purge.
    pub async fn has_pending(&self, identity: &Identity) -> DomainResult<bool> {
        let (code, expiry) = self.read_record(&identity.id).await?;
        let pending = match (code, expiry) {
            (Some(code), Some(expiry)) => OtpRecord::from_attributes(code, &expiry)
                .map(|record| !record.is_expired_at(self.clock.now()))
                .unwrap_or(false),
            _ => false,
        };
        Ok(pending)
    }

    /// Remove any pending code for the identity
    pub async fn clear(&self, identity: &Identity) -> DomainResult<()> {
        self.store
            .remove_attribute(&identity.id, ATTR_OTP_CODE)
            .await?;
        self.store
            .remove_attribute(&identity.id, ATTR_OTP_EXPIRY)
            .await?;
        Ok(())
    }

    /// Read code and expiry as one snapshot
    async fn read_record(&self, identity_id: &str) -> DomainResult<(Option<String>, Option<String>)> {
        let mut values = self
            .store
            .get_attributes(identity_id, &[ATTR_OTP_CODE, ATTR_OTP_EXPIRY])
            .await?
            .into_iter();
        let code = values.next().flatten();
        let expiry = values.next().flatten();
        Ok((code, expiry))
    }
}
