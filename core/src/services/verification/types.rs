//! Commands and results of the verification workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to issue a code
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendCodeCommand {
    /// Realm the identity lives in
    pub realm: String,
    pub email: Option<String>,
    pub user_id: Option<String>,
    /// Calling client application, checked when present
    pub client_id: Option<String>,
}

/// Request to verify a code
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyCodeCommand {
    pub realm: String,
    pub email: Option<String>,
    pub user_id: Option<String>,
    pub code: Option<String>,
    pub client_id: Option<String>,
}

/// Result of sending a code
#[derive(Debug, Clone, Serialize)]
pub struct SendCodeResult {
    /// Identity the code was issued to
    pub identity_id: String,
    /// Recipient address, masked for display
    pub masked_email: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone, Serialize)]
pub struct VerifyCodeResult {
    pub identity_id: String,
}
