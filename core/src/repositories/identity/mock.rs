//! Mock implementation of IdentityDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::identity::{ClientInfo, Identity, IdentityLookup};
use crate::errors::DomainError;

use super::trait_::IdentityDirectory;

/// Mock realm directory for testing
pub struct MockIdentityDirectory {
    /// (realm, identity id) -> identity
    identities: Arc<RwLock<HashMap<(String, String), Identity>>>,
    /// (realm, client id) -> client
    clients: Arc<RwLock<HashMap<(String, String), ClientInfo>>>,
    lookups: AtomicUsize,
}

impl MockIdentityDirectory {
    /// Create a new mock directory
    pub fn new() -> Self {
        Self {
            identities: Arc::new(RwLock::new(HashMap::new())),
            clients: Arc::new(RwLock::new(HashMap::new())),
            lookups: AtomicUsize::new(0),
        }
    }

    pub async fn add_identity(&self, identity: Identity) {
        self.identities
            .write()
            .await
            .insert((identity.realm.name.clone(), identity.id.clone()), identity);
    }

    pub async fn add_client(&self, realm: &str, client_id: &str, enabled: bool) {
        self.clients.write().await.insert(
            (realm.to_string(), client_id.to_string()),
            ClientInfo {
                client_id: client_id.to_string(),
                enabled,
            },
        );
    }

    /// Number of identity lookups served
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockIdentityDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityDirectory for MockIdentityDirectory {
    async fn find_identity(
        &self,
        realm: &str,
        lookup: &IdentityLookup,
    ) -> Result<Option<Identity>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let identities = self.identities.read().await;
        let found = match lookup {
            IdentityLookup::ById(id) => identities.get(&(realm.to_string(), id.clone())).cloned(),
            IdentityLookup::ByEmail(email) => identities
                .values()
                .find(|identity| {
                    identity.realm.name == realm
                        && identity
                            .email_address()
                            .map(|e| e.eq_ignore_ascii_case(email))
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
        let clients = self.clients.read().await;
        Ok(clients
            .get(&(realm.to_string(), client_id.to_string()))
            .cloned())
    }
}
