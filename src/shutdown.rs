//! Shutdown fan-out shared by the signal handler and the dispatcher.
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Resolves once shutdown is requested. A closed channel never resolves: with
/// no sender left nobody can ask for shutdown anymore.
pub async fn wait_for_shutdown(shutdown_rx: &mut ShutdownReceiver) {
    match shutdown_rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}

/// Non-blocking check for a pending shutdown request.
pub fn shutdown_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Lagged(_)) => true,
        Err(TryRecvError::Empty | TryRecvError::Closed) => false,
    }
}
