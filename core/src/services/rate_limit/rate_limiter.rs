//! Rate limiting trait consumed by the verification workflow

use crate::domain::value_objects::OtpOperation;

/// Admission control for OTP operations, keyed by identifier
///
/// Implementations never block on I/O; admission is a purely in-memory
/// check-and-increment.
pub trait RateLimiterTrait: Send + Sync {
    /// Admit a send attempt, counting it when admitted
    fn allow_send(&self, identifier: &str) -> bool;

    /// Admit a verify attempt, counting it when admitted
    fn allow_verify(&self, identifier: &str) -> bool;

    /// Admit an attempt of the given operation class
    fn allow(&self, operation: OtpOperation, identifier: &str) -> bool {
        match operation {
            OtpOperation::Send => self.allow_send(identifier),
            OtpOperation::Verify => self.allow_verify(identifier),
        }
    }

    /// Evict expired windows, returning how many were removed
    fn cleanup(&self) -> usize;
}
