use tokio::sync::broadcast;

use crate::shutdown::{ShutdownReceiver, ShutdownSender, wait_for_shutdown};

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Broadcast channel size for shutdown notifications (single signal fan-out).
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Interrupt and terminate hooks, installed when this value is created.
///
/// Signals delivered after `register` are buffered until the handler task
/// polls them, so the process never falls back to the default disposition.
pub struct ShutdownSignals {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
}

impl ShutdownSignals {
    /// Installs the hooks. Must be called from inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error when a signal hook cannot be installed.
    #[cfg(unix)]
    pub fn register() -> Result<Self, std::io::Error> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Installs the hooks. Ctrl+C is hooked when the handler task starts.
    ///
    /// # Errors
    ///
    /// Never fails on this platform.
    #[cfg(not(unix))]
    pub const fn register() -> Result<Self, std::io::Error> {
        Ok(Self {})
    }

    #[cfg(unix)]
    async fn recv(&mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

/// Turns a received signal into a shutdown broadcast.
///
/// The task ends after forwarding a signal, or when shutdown is broadcast by
/// someone else.
pub fn setup_signal_shutdown_handler(
    shutdown_tx: &ShutdownSender,
    mut signals: ShutdownSignals,
) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        tokio::select! {
            () = wait_for_shutdown(&mut shutdown_rx) => {}
            () = signals.recv() => {
                tracing::debug!("Shutdown signal received");
                drop(shutdown_tx.send(()));
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::shutdown_requested;
    use std::future::Future;
    use std::time::Duration;

    const SHUTDOWN_HANDLER_TIMEOUT: Duration = Duration::from_secs(1);

    fn run_async_test<F>(future: F) -> Result<(), String>
    where
        F: Future<Output = Result<(), String>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| format!("Failed to build runtime: {}", err))?;
        runtime.block_on(future)
    }

    #[test]
    fn signal_handler_exits_on_shutdown() -> Result<(), String> {
        run_async_test(async {
            let (shutdown_tx, _) = shutdown_channel();
            let signals = ShutdownSignals::register()
                .map_err(|err| format!("Failed to register signals: {}", err))?;
            let handle = setup_signal_shutdown_handler(&shutdown_tx, signals);

            if shutdown_tx.send(()).is_err() {
                return Err("Failed to send shutdown".to_owned());
            }

            tokio::time::timeout(SHUTDOWN_HANDLER_TIMEOUT, handle)
                .await
                .map_err(|err| format!("Timed out waiting for shutdown handler: {}", err))?
                .map_err(|err| format!("Shutdown task join error: {}", err))?;
            Ok(())
        })
    }

    #[test]
    fn shutdown_requested_sees_pending_signal() -> Result<(), String> {
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        if shutdown_requested(&mut shutdown_rx) {
            return Err("No shutdown was sent yet".to_owned());
        }
        if shutdown_tx.send(()).is_err() {
            return Err("Failed to send shutdown".to_owned());
        }
        if !shutdown_requested(&mut shutdown_rx) {
            return Err("Expected pending shutdown".to_owned());
        }
        Ok(())
    }

    #[test]
    fn closed_channel_is_not_a_shutdown() -> Result<(), String> {
        run_async_test(async {
            let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
            drop(shutdown_tx);
            if shutdown_requested(&mut shutdown_rx) {
                return Err("Closed channel should not request shutdown".to_owned());
            }
            let waited = tokio::time::timeout(
                Duration::from_millis(50),
                wait_for_shutdown(&mut shutdown_rx),
            )
            .await;
            if waited.is_ok() {
                return Err("Closed channel should never resolve".to_owned());
            }
            Ok(())
        })
    }
}
