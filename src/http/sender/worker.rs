use std::sync::Arc;

use tokio::task::JoinSet;

use crate::metrics::Aggregator;

use super::super::Executor;

/// Spawns one request execution. The outcome is recorded as soon as the
/// request finishes, independent of the launch loop.
pub(super) fn spawn_execution<E>(
    in_flight: &mut JoinSet<()>,
    executor: Arc<E>,
    aggregator: Arc<Aggregator>,
) where
    E: Executor + 'static,
{
    in_flight.spawn(async move {
        let outcome = executor.execute().await;
        aggregator.record(&outcome);
    });
}
