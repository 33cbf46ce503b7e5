//! Application factory
//!
//! Route and extractor configuration shared by the binary and the HTTP
//! tests. Middleware is added by the caller so tests can run without a
//! tracing subscriber.

use actix_web::{web, HttpResponse};

use otp_core::repositories::{AttributeStore, IdentityDirectory};
use otp_core::services::{EmailServiceTrait, RateLimiterTrait};
use otp_shared::HealthResponse;

use crate::handlers::json_error_handler;
use crate::routes::otp;
use crate::state::AppState;

const SERVICE_NAME: &str = "email-otp";

/// Register state, extractor config and every route
pub fn configure<D, A, E, L>(
    state: web::Data<AppState<D, A, E, L>>,
) -> impl FnOnce(&mut web::ServiceConfig)
where
    D: IdentityDirectory + 'static,
    A: AttributeStore + 'static,
    E: EmailServiceTrait + 'static,
    L: RateLimiterTrait + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(state)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health", web::get().to(health_check))
            .service(web::scope(otp::SCOPE).configure(otp::configure::<D, A, E, L>));
    }
}

/// Process-level health check
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME))
}
