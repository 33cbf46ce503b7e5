//! # Email OTP Core
//!
//! Core business logic for issuing and verifying email one-time codes.
//! This crate contains the domain entities, the code generator, the
//! per-identifier rate limiter, the OTP lifecycle manager, the
//! verification workflow, the collaborator traits it consumes and the
//! error types that flow through all of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
