//! Infrastructure service implementations

pub mod cleanup;

pub use cleanup::{CleanupHandle, RateLimitCleanupTask};
