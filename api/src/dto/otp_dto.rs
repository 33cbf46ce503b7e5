use serde::{Deserialize, Serialize};
use validator::Validate;

use otp_core::services::{SendCodeCommand, VerifyCodeCommand};

/// Body of `POST /realms/{realm}/email-otp/send`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub user_id: Option<String>,
    #[validate(length(max = 255))]
    pub client_id: Option<String>,
}

/// Body of `POST /realms/{realm}/email-otp/verify`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub user_id: Option<String>,
    #[validate(length(max = 64))]
    pub code: Option<String>,
    #[validate(length(max = 255))]
    pub client_id: Option<String>,
}

/// Blank strings mean "not provided"
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SendOtpRequest {
    /// Drop blank fields so they are neither validated nor looked up
    pub fn normalized(self) -> Self {
        Self {
            email: present(self.email),
            user_id: present(self.user_id),
            client_id: present(self.client_id),
        }
    }

    pub fn into_command(self, realm: String) -> SendCodeCommand {
        SendCodeCommand {
            realm,
            email: self.email,
            user_id: self.user_id,
            client_id: self.client_id,
        }
    }
}

impl VerifyOtpRequest {
    /// Drop blank identifier fields; the code is passed through as sent
    pub fn normalized(self) -> Self {
        Self {
            email: present(self.email),
            user_id: present(self.user_id),
            code: self.code,
            client_id: present(self.client_id),
        }
    }

    pub fn into_command(self, realm: String) -> VerifyCodeCommand {
        VerifyCodeCommand {
            realm,
            email: self.email,
            user_id: self.user_id,
            code: self.code,
            client_id: self.client_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_accepts_camel_case() {
        let request: SendOtpRequest =
            serde_json::from_str(r#"{"userId":"u-1","clientId":"web-app"}"#).unwrap();
        assert_eq!(request.user_id.as_deref(), Some("u-1"));
        assert_eq!(request.client_id.as_deref(), Some("web-app"));
        assert_eq!(request.email, None);
    }

    #[test]
    fn test_email_format_is_validated() {
        let request = SendOtpRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = SendOtpRequest {
            email: Some("john.doe@example.com".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_email_is_dropped_before_validation() {
        let request = SendOtpRequest {
            email: Some("   ".to_string()),
            user_id: Some("u-1".to_string()),
            client_id: Some(String::new()),
        }
        .normalized();

        assert!(request.validate().is_ok());
        assert_eq!(request.email, None);
        assert_eq!(request.client_id, None);
    }

    #[test]
    fn test_verify_request_keeps_code_verbatim() {
        let request: VerifyOtpRequest =
            serde_json::from_str(r#"{"email":"a@b.co","code":" 123456 "}"#).unwrap();
        let command = request.normalized().into_command("acme".to_string());
        assert_eq!(command.code.as_deref(), Some(" 123456 "));
        assert_eq!(command.realm, "acme");
    }
}
