//! OTP lifecycle module
//!
//! Issues one-time codes against an identity, stores them in the identity's
//! attribute side-table, hands them to the email subsystem and verifies
//! candidates against the stored record.

mod generator;
mod service;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use generator::CodeGenerator;
pub use service::OtpService;
pub use traits::EmailServiceTrait;
