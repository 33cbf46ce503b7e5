//! Seed data format for the in-memory directory
//!
//! ```json
//! {
//!   "realms": [{
//!     "name": "acme",
//!     "displayName": "Acme Corp",
//!     "users": [{ "id": "u-1", "username": "jdoe", "email": "john@acme.test", "firstName": "John" }],
//!     "clients": [{ "clientId": "web-app", "enabled": true }]
//!   }]
//! }
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySeed {
    #[serde(default)]
    pub realms: Vec<RealmSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmSeed {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub clients: Vec<ClientSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSeed {
    pub client_id: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}
