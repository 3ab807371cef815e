use std::time::Duration;

use tokio::time::sleep;

use crate::domain::LaunchRate;
use crate::shutdown::{ShutdownReceiver, shutdown_requested, wait_for_shutdown};

/// Spaces launches by a fixed delay. Only the launch pace is bounded; nothing
/// here limits how many requests are in flight.
#[derive(Debug, Clone, Copy)]
pub(super) struct LaunchPacer {
    delay: Option<Duration>,
}

impl LaunchPacer {
    pub(super) fn new(rate: LaunchRate) -> Self {
        Self {
            delay: rate.launch_delay(),
        }
    }

    pub(super) const fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Waits out the inter-launch delay. Returns `false` when shutdown was
    /// requested first.
    pub(super) async fn pause(&self, shutdown_rx: &mut ShutdownReceiver) -> bool {
        match self.delay {
            Some(delay) => {
                tokio::select! {
                    () = sleep(delay) => true,
                    () = wait_for_shutdown(shutdown_rx) => false,
                }
            }
            None => !shutdown_requested(shutdown_rx),
        }
    }
}
