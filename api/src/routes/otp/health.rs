use actix_web::{web, HttpResponse};

use otp_core::repositories::{AttributeStore, IdentityDirectory};
use otp_core::services::{EmailServiceTrait, RateLimiterTrait};
use otp_shared::OtpResponse;

use crate::state::AppState;

/// Handler for GET /realms/{realm}/email-otp/health
pub async fn health<D, A, E, L>(state: web::Data<AppState<D, A, E, L>>) -> HttpResponse
where
    D: IdentityDirectory + 'static,
    A: AttributeStore + 'static,
    E: EmailServiceTrait + 'static,
    L: RateLimiterTrait + 'static,
{
    HttpResponse::Ok().json(OtpResponse::success(format!(
        "{} Email OTP service is running",
        state.company_name
    )))
}
