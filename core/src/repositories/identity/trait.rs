//! Repository traits for the realm directory and the per-identity
//! attribute side-table.
//!
//! The OTP lifecycle only ever talks to [`AttributeStore`]; identity and
//! client resolution live in [`IdentityDirectory`] so that either can be
//! backed by a different system.

use async_trait::async_trait;

use crate::domain::entities::identity::{ClientInfo, Identity, IdentityLookup};
use crate::errors::DomainError;

/// Read access to identities and clients of a realm
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use otp_core::repositories::IdentityDirectory;
/// use otp_core::domain::entities::{ClientInfo, Identity, IdentityLookup};
/// use otp_core::errors::DomainError;
///
/// struct LdapDirectory;
///
/// #[async_trait]
/// impl IdentityDirectory for LdapDirectory {
///     async fn find_identity(
///         &self,
///         realm: &str,
///         lookup: &IdentityLookup,
///     ) -> Result<Option<Identity>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_client(
///         &self,
///         realm: &str,
///         client_id: &str,
///     ) -> Result<Option<ClientInfo>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Find an identity by id or email inside a realm
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Identity found
    /// * `Ok(None)` - No identity matches
    /// * `Err(DomainError)` - The directory could not be queried
    async fn find_identity(
        &self,
        realm: &str,
        lookup: &IdentityLookup,
    ) -> Result<Option<Identity>, DomainError>;

    /// Find a registered client application by its client id
    async fn find_client(
        &self,
        realm: &str,
        client_id: &str,
    ) -> Result<Option<ClientInfo>, DomainError>;
}

/// Key-value side-table attached to identities
///
/// Keys used by the OTP lifecycle are `otp_code` and `otp_expiry`.
#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// Read a single attribute value
    async fn get_attribute(&self, identity_id: &str, key: &str)
        -> Result<Option<String>, DomainError>;

    /// Set (or overwrite) an attribute value
    async fn set_attribute(
        &self,
        identity_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), DomainError>;

    /// Remove an attribute; removing an absent key is not an error
    async fn remove_attribute(&self, identity_id: &str, key: &str) -> Result<(), DomainError>;

    /// Record whether the identity's email address is verified
    async fn set_email_verified(&self, identity_id: &str, verified: bool)
        -> Result<(), DomainError>;

    /// Read several attributes as one snapshot
    ///
    /// The default reads them one by one; stores that can read atomically
    /// should override it.
    async fn get_attributes(
        &self,
        identity_id: &str,
        keys: &[&str],
    ) -> Result<Vec<Option<String>>, DomainError> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(self.get_attribute(identity_id, key).await?);
        }
        Ok(values)
    }
}
