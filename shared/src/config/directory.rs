//! Identity directory configuration

use serde::{Deserialize, Serialize};

/// Where the in-memory realm directory is populated from
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// JSON file with realms, users and clients loaded at startup
    pub seed_file: Option<String>,
}
