//! Mapping of workflow failures onto HTTP responses
//!
//! Every OTP endpoint answers with the [`OtpResponse`] envelope; the status
//! code is derived from the stable `errorCode`.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use otp_core::errors::{DomainError, OtpError};
use otp_shared::errors::error_codes;
use otp_shared::{ErrorResponse, OtpResponse};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// HTTP status for an error code
pub fn status_for(error_code: &str) -> StatusCode {
    match error_code {
        error_codes::MISSING_IDENTIFIER
        | error_codes::MISSING_CODE
        | error_codes::NO_EMAIL
        | error_codes::INVALID_CLIENT
        | error_codes::INVALID_CODE
        | error_codes::VALIDATION_ERROR => StatusCode::BAD_REQUEST,
        error_codes::USER_NOT_FOUND => StatusCode::NOT_FOUND,
        error_codes::RATE_LIMIT_EXCEEDED => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing message; internal detail such as the verify rejection
/// reason or the transport error stays in the logs
fn public_message(error: &OtpError) -> String {
    match error {
        OtpError::RateLimitExceeded { .. } => {
            "Too many attempts. Please try again later.".to_string()
        }
        OtpError::InvalidClient { .. } => "Invalid client".to_string(),
        OtpError::DeliveryFailed { .. } => {
            "Failed to send OTP. Please check email configuration.".to_string()
        }
        OtpError::InvalidCode { .. } => "Invalid or expired OTP code".to_string(),
        other => other.to_string(),
    }
}

/// Response for a caller-facing workflow rejection
pub fn otp_error_response(error: &OtpError) -> HttpResponse {
    let code = error.error_code();
    HttpResponse::build(status_for(code)).json(OtpResponse::failure(public_message(error), code))
}

/// Response for any error returned by the workflow
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Otp(otp_error) => otp_error_response(otp_error),
        other => {
            tracing::error!(error = %other, "Unexpected error in OTP workflow");
            HttpResponse::InternalServerError().json(OtpResponse::failure(
                INTERNAL_MESSAGE,
                error_codes::INTERNAL_ERROR,
            ))
        }
    }
}

/// Response for a body that failed field validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();

    tracing::debug!(fields = ?fields, "Request validation failed");

    HttpResponse::BadRequest().json(OtpResponse::failure(
        format!("Invalid request field(s): {}", fields.join(", ")),
        error_codes::VALIDATION_ERROR,
    ))
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");

    let response = HttpResponse::BadRequest().json(OtpResponse::failure(
        "Invalid request body",
        error_codes::VALIDATION_ERROR,
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
