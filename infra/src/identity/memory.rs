//! In-memory realm directory and attribute store

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use otp_core::domain::entities::identity::{ClientInfo, Identity, IdentityLookup, RealmRef};
use otp_core::errors::DomainError;
use otp_core::repositories::{AttributeStore, IdentityDirectory};

use super::seed::DirectorySeed;
use crate::InfrastructureError;

/// Process-local identity directory
///
/// Identities are keyed by id (unique across realms); attributes are kept in
/// a per-identity map so a multi-key read happens under one lock.
#[derive(Clone, Default)]
pub struct InMemoryIdentityStore {
    realms: Arc<RwLock<HashMap<String, RealmRef>>>,
    identities: Arc<RwLock<HashMap<String, Identity>>>,
    /// (realm, client id) -> client
    clients: Arc<RwLock<HashMap<(String, String), ClientInfo>>>,
    attributes: Arc<RwLock<HashMap<String, HashMap<String, String>>>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed data
    pub async fn from_seed(seed: DirectorySeed) -> Self {
        let store = Self::new();
        for realm_seed in seed.realms {
            let mut realm = RealmRef::new(realm_seed.name.clone());
            if let Some(display_name) = realm_seed.display_name {
                realm = realm.with_display_name(display_name);
            }
            store.add_realm(realm.clone()).await;

            for user in realm_seed.users {
                let mut identity = Identity::new(user.id, realm.clone(), user.username);
                identity.email = user.email;
                identity.first_name = user.first_name;
                identity.email_verified = user.email_verified;
                store.insert_identity(identity).await;
            }

            for client in realm_seed.clients {
                store
                    .register_client(&realm.name, &client.client_id, client.enabled)
                    .await;
            }
        }
        store
    }

    /// Load seed data from a JSON file
    pub async fn load_seed_file(path: impl AsRef<Path>) -> Result<Self, InfrastructureError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: DirectorySeed = serde_json::from_str(&raw)?;

        let store = Self::from_seed(seed).await;
        tracing::info!(
            path = %path.display(),
            realms = store.realms.read().await.len(),
            identities = store.identities.read().await.len(),
            "Loaded identity directory seed"
        );
        Ok(store)
    }

    pub async fn add_realm(&self, realm: RealmRef) {
        self.realms.write().await.insert(realm.name.clone(), realm);
    }

    /// Insert or replace an identity; its realm is registered if unknown
    pub async fn insert_identity(&self, identity: Identity) {
        self.realms
            .write()
            .await
            .entry(identity.realm.name.clone())
            .or_insert_with(|| identity.realm.clone());
        self.identities
            .write()
            .await
            .insert(identity.id.clone(), identity);
    }

    pub async fn register_client(&self, realm: &str, client_id: &str, enabled: bool) {
        self.clients.write().await.insert(
            (realm.to_string(), client_id.to_string()),
            ClientInfo {
                client_id: client_id.to_string(),
                enabled,
            },
        );
    }

    pub async fn identity(&self, identity_id: &str) -> Option<Identity> {
        self.identities.read().await.get(identity_id).cloned()
    }

    pub async fn realm_exists(&self, realm: &str) -> bool {
        self.realms.read().await.contains_key(realm)
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityStore {
    async fn find_identity(
        &self,
        realm: &str,
        lookup: &IdentityLookup,
    ) -> Result<Option<Identity>, DomainError> {
        let identities = self.identities.read().await;
        let found = match lookup {
            IdentityLookup::ById(id) => identities
                .get(id)
                .filter(|identity| identity.realm.name == realm)
                .cloned(),
            IdentityLookup::ByEmail(email) => identities
                .values()
                .find(|identity| {
                    identity.realm.name == realm
                        && identity
                            .email_address()
                            .map(|address| address.eq_ignore_ascii_case(email.trim()))
                            .unwrap_or(false)
                })
                .cloned(),
        };
        Ok(found)
    }

    async fn find_client(
        &self,
        realm: &str,
        client_id: &str,
    ) -> Result<Option<ClientInfo>, DomainError> {
        Ok(self
            .clients
            .read()
            .await
            .get(&(realm.to_string(), client_id.to_string()))
            .cloned())
    }
}

#[async_trait]
impl AttributeStore for InMemoryIdentityStore {
    async fn get_attribute(
        &self,
        identity_id: &str,
        key: &str,
    ) -> Result<Option<String>, DomainError> {
        Ok(self
            .attributes
            .read()
            .await
            .get(identity_id)
            .and_then(|attrs| attrs.get(key))
            .cloned())
    }

    async fn set_attribute(
        &self,
        identity_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), DomainError> {
        self.attributes
            .write()
            .await
            .entry(identity_id.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_attribute(&self, identity_id: &str, key: &str) -> Result<(), DomainError> {
        let mut attributes = self.attributes.write().await;
        if let Some(attrs) = attributes.get_mut(identity_id) {
            attrs.remove(key);
            if attrs.is_empty() {
                attributes.remove(identity_id);
            }
        }
        Ok(())
    }

    async fn set_email_verified(
        &self,
        identity_id: &str,
        verified: bool,
    ) -> Result<(), DomainError> {
        let mut identities = self.identities.write().await;
        match identities.get_mut(identity_id) {
            Some(identity) => {
                identity.email_verified = verified;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("identity {}", identity_id),
            }),
        }
    }

    async fn get_attributes(
        &self,
        identity_id: &str,
        keys: &[&str],
    ) -> Result<Vec<Option<String>>, DomainError> {
        let attributes = self.attributes.read().await;
        let attrs = attributes.get(identity_id);
        Ok(keys
            .iter()
            .map(|key| attrs.and_then(|attrs| attrs.get(*key)).cloned())
            .collect())
    }
}
