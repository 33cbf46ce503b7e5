//! Counting window of a single identifier

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::value_objects::OtpOperation;

/// Attempt counters of one identifier inside the current window
///
/// Both counters share `window_start` and are reset together.
#[derive(Debug, Clone)]
pub struct RateWindow {
    send_count: u32,
    verify_count: u32,
    window_start: DateTime<Utc>,
    /// Set once cleanup has evicted the window from the map; admission must
    /// then start over with a fresh entry.
    retired: bool,
}

impl RateWindow {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            send_count: 0,
            verify_count: 0,
            window_start: now,
            retired: false,
        }
    }

    /// Whether the window is older than `window` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.window_start > window
    }

    /// Reset-if-expired, threshold check and increment as one step
    ///
    /// The caller must hold the window's lock.
    pub fn try_admit(
        &mut self,
        operation: OtpOperation,
        max: u32,
        now: DateTime<Utc>,
        window: Duration,
    ) -> bool {
        if self.is_expired(now, window) {
            self.send_count = 0;
            self.verify_count = 0;
            self.window_start = now;
        }

        let count = match operation {
            OtpOperation::Send => &mut self.send_count,
            OtpOperation::Verify => &mut self.verify_count,
        };

        if *count >= max {
            return false;
        }
        *count += 1;
        true
    }

    pub fn retire(&mut self) {
        self.retired = true;
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            send_count: self.send_count,
            verify_count: self.verify_count,
            window_start: self.window_start,
        }
    }
}

/// Read-only copy of a window's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSnapshot {
    pub send_count: u32,
    pub verify_count: u32,
    pub window_start: DateTime<Utc>,
}
