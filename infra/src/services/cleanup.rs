//! Periodic eviction of expired rate-limit windows
//!
//! Windows are created on first use and would otherwise live for the whole
//! process lifetime. The task calls the limiter's `cleanup` on a fixed
//! interval until it is shut down.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use otp_core::services::RateLimiterTrait;

/// Background task evicting stale rate windows
pub struct RateLimitCleanupTask<L: RateLimiterTrait + 'static> {
    limiter: Arc<L>,
    interval: Duration,
}

impl<L: RateLimiterTrait + 'static> RateLimitCleanupTask<L> {
    /// Create a cleanup task
    ///
    /// An interval of zero seconds is raised to one.
    pub fn new(limiter: Arc<L>, interval_seconds: u64) -> Self {
        Self {
            limiter,
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Run a single cleanup cycle, returning the number of evicted windows
    pub fn run_once(&self) -> usize {
        let removed = self.limiter.cleanup();
        if removed > 0 {
            info!(removed = removed, "Evicted expired rate-limit windows");
        } else {
            debug!("No expired rate-limit windows");
        }
        removed
    }

    /// Start the task in the background
    ///
    /// The first cycle runs one interval after start.
    pub fn start(self) -> CleanupHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let interval = self.interval;

        let join = tokio::spawn(async move {
            info!(
                "Rate-limit cleanup started - will run every {} seconds",
                interval.as_secs()
            );

            let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        self.run_once();
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Rate-limit cleanup stopped");
        });

        CleanupHandle {
            shutdown: shutdown_tx,
            join,
        }
    }
}

/// Handle to a running cleanup task
pub struct CleanupHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl CleanupHandle {
    /// Signal the task to stop and wait for it to finish
    pub async fn shutdown(self) {
        if self.shutdown.send(true).is_err() {
            warn!("Rate-limit cleanup task already stopped");
        }
        if let Err(e) = self.join.await {
            warn!(error = %e, "Rate-limit cleanup task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
