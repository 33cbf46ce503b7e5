use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::repositories::{AttributeStore, IdentityDirectory};
use otp_core::services::{EmailServiceTrait, RateLimiterTrait};
use otp_shared::OtpResponse;

use crate::dto::VerifyOtpRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /realms/{realm}/email-otp/verify
///
/// On success the identity's email is marked verified and the code is
/// consumed.
///
/// # Request Body
///
/// ```json
/// { "userId": "u-1", "code": "483920" }
/// ```
///
/// ## Errors
/// `MISSING_IDENTIFIER`, `MISSING_CODE`, `INVALID_CLIENT`, `INVALID_CODE`,
/// `VALIDATION_ERROR` (400), `USER_NOT_FOUND` (404), `RATE_LIMIT_EXCEEDED` (429)
pub async fn verify_otp<D, A, E, L>(
    realm: web::Path<String>,
    state: web::Data<AppState<D, A, E, L>>,
    request: web::Json<VerifyOtpRequest>,
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

    match state.workflow.verify_code(command).await {
        Ok(result) => {
            tracing::info!(
                realm = %realm,
                identity_id = %result.identity_id,
                "OTP verify request completed"
            );
            HttpResponse::Ok().json(OtpResponse::success("Email verified successfully"))
        }
        Err(error) => domain_error_response(&error),
    }
}
