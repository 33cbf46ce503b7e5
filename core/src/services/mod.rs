//! Business services containing domain logic and use cases.

pub mod clock;
pub mod otp;
pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use otp::{CodeGenerator, EmailServiceTrait, OtpService};
pub use rate_limit::{RateLimiter, RateLimiterTrait, WindowSnapshot};
pub use verification::{
    SendCodeCommand, SendCodeResult, VerificationWorkflow, VerifyCodeCommand, VerifyCodeResult,
};
