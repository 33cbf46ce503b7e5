//! Per-identifier fixed-window rate limiting for the send and verify
//! operations.

mod limiter;
mod rate_limiter;
mod window;


pub use limiter::RateLimiter;
pub use rate_limiter::RateLimiterTrait;
pub use window::{RateWindow, WindowSnapshot};
