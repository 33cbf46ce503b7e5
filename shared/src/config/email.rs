//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// Settings used when rendering and sending OTP emails
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Delivery provider ("mock" is the only built-in transport)
    pub provider: String,

    /// Sender address placed in the From header
    pub from_address: String,

    /// Sender display name
    pub from_display_name: String,

    /// Company name injected into templates as `companyName`
    pub company_name: String,

    /// Print rendered messages to stdout (mock provider only)
    pub console_output: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            from_address: String::from("no-reply@lusatek.com"),
            from_display_name: String::from("LUSATEK"),
            company_name: String::from("LUSATEK"),
            console_output: false,
        }
    }
}
