//! Email OTP route handlers
//!
//! Mounted under `/realms/{realm}/email-otp`:
//! - `POST /send` issues a code to an identity
//! - `POST /verify` checks a code and marks the email verified
//! - `GET /health` liveness probe

pub mod health;
pub mod send;
pub mod verify;

use actix_web::web;

use otp_core::repositories::{AttributeStore, IdentityDirectory};
use otp_core::services::{EmailServiceTrait, RateLimiterTrait};

pub use health::health;
pub use send::send_otp;
pub use verify::verify_otp;

/// Path prefix of the OTP scope
pub const SCOPE: &str = "/realms/{realm}/email-otp";

/// Register the OTP routes on a scope
pub fn configure<D, A, E, L>(cfg: &mut web::ServiceConfig)
where
    D: IdentityDirectory + 'static,
    A: AttributeStore + 'static,
    E: EmailServiceTrait + 'static,
    L: RateLimiterTrait + 'static,
{
    cfg.route("/send", web::post().to(send_otp::<D, A, E, L>))
        .route("/verify", web::post().to(verify_otp::<D, A, E, L>))
        .route("/health", web::get().to(health::<D, A, E, L>));
}
