//! Value objects describing operation outcomes.

pub mod otp_outcome;

pub use otp_outcome::{IssueOutcome, OtpOperation, VerifyOutcome, VerifyRejection};
