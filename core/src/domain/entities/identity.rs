//! Identity entity resolved from the realm directory.

use serde::{Deserialize, Serialize};

/// Reference to the realm (tenant) an identity belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmRef {
    /// Realm name used in URLs
    pub name: String,

    /// Optional human-friendly name
    pub display_name: Option<String>,
}

impl RealmRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Name shown to end users: the display name when set, otherwise the realm name
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Account record an OTP is issued against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Directory identifier, also used as the rate-limit key
    pub id: String,

    /// Realm the identity lives in
    pub realm: RealmRef,

    /// Login name
    pub username: String,

    /// Email address the code is delivered to
    pub email: Option<String>,

    /// Given name used to greet the user
    pub first_name: Option<String>,

    /// Whether the email address has been verified
    pub email_verified: bool,
}

impl Identity {
    pub fn new(id: impl Into<String>, realm: RealmRef, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            realm,
            username: username.into(),
            email: None,
            first_name: None,
            email_verified: false,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// The email address, if present and non-empty
    pub fn email_address(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.trim().is_empty())
    }

    /// Name used in greetings: first name when available, otherwise the username
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

/// How a caller identifies the identity it is acting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityLookup {
    ById(String),
    ByEmail(String),
}

impl IdentityLookup {
    /// Build a lookup from optional request fields.
    ///
    /// The user id wins when both are supplied; blank values are ignored.
    pub fn from_parts(email: Option<&str>, user_id: Option<&str>) -> Option<Self> {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(id) = non_blank(user_id) {
            Some(IdentityLookup::ById(id))
        } else {
            non_blank(email).map(IdentityLookup::ByEmail)
        }
    }
}

/// Registered client application in a realm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub client_id: String,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_prefers_user_id() {
        let lookup = IdentityLookup::from_parts(Some("a@example.com"), Some("user-1"));
        assert_eq!(lookup, Some(IdentityLookup::ById("user-1".to_string())));
    }

    #[test]
    fn test_lookup_ignores_blank_values() {
        let lookup = IdentityLookup::from_parts(Some("a@example.com"), Some("  "));
        assert_eq!(
            lookup,
            Some(IdentityLookup::ByEmail("a@example.com".to_string()))
        );
        assert_eq!(IdentityLookup::from_parts(Some(""), None), None);
        assert_eq!(IdentityLookup::from_parts(None, None), None);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let realm = RealmRef::new("acme");
        let identity = Identity::new("1", realm.clone(), "jdoe");
        assert_eq!(identity.display_name(), "jdoe");

        let named = identity.with_first_name("John");
        assert_eq!(named.display_name(), "John");
    }

    #[test]
    fn test_realm_label() {
        assert_eq!(RealmRef::new("acme").label(), "acme");
        assert_eq!(
            RealmRef::new("acme").with_display_name("Acme Corp").label(),
            "Acme Corp"
        );
    }

    #[test]
    fn test_blank_email_is_absent() {
        let identity = Identity::new("1", RealmRef::new("acme"), "jdoe").with_email("  ");
        assert_eq!(identity.email_address(), None);
    }
}
