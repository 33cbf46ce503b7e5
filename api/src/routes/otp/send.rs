use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::repositories::{AttributeStore, IdentityDirectory};
use otp_core::services::{EmailServiceTrait, RateLimiterTrait};
use otp_shared::OtpResponse;

use crate::dto::SendOtpRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /realms/{realm}/email-otp/send
///
/// # Request Body
///
/// ```json
/// { "email": "john.doe@example.com", "clientId": "web-app" }
/// ```
///
/// `userId` may be given instead of (or as well as) `email`; it wins when
/// both are present.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "OTP sent successfully to jo***@example.com" }
/// ```
///
/// ## Errors
/// `MISSING_IDENTIFIER`, `NO_EMAIL`, `INVALID_CLIENT`, `VALIDATION_ERROR` (400),
/// `USER_NOT_FOUND` (404), `RATE_LIMIT_EXCEEDED` (429), `SEND_FAILED` (500)
pub async fn send_otp<D, A, E, L>(
    realm: web::Path<String>,
    state: web::Data<AppState<D, A, E, L>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    D: IdentityDirectory + 'static,
    A: AttributeStore + 'static,
    E: EmailServiceTrait + 'static,
    L: RateLimiterTrait + 'static,
{
    let request = request.into_inner().normalized();
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let realm = realm.into_inner();
    let command = request.into_command(realm.clone());

    match state.workflow.send_code(command).await {
        Ok(result) => {
            tracing::info!(
                realm = %realm,
                identity_id = %result.identity_id,
                expires_at = %result.expires_at,
                "OTP send request completed"
            );
            HttpResponse::Ok().json(OtpResponse::success(format!(
                "OTP sent successfully to {}",
                result.masked_email
            )))
        }
        Err(error) => domain_error_response(&error),
    }
}
