//! Verification workflow module
//!
//! Composes identity resolution, rate-limit admission and the OTP lifecycle
//! into the two caller-facing operations:
//! - send a code to an identity's email address
//! - verify a code and mark the address verified

mod service;
mod types;


pub use service::VerificationWorkflow;
pub use types::{SendCodeCommand, SendCodeResult, VerifyCodeCommand, VerifyCodeResult};
