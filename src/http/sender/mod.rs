mod worker;

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::{
    domain::{RunConfig, RunPhase},
    error::DispatchError,
    metrics::{Aggregator, RunStats},
    shutdown::{ShutdownReceiver, shutdown_requested, wait_for_shutdown},
};

use super::Executor;
use super::rate::LaunchPacer;
use worker::spawn_execution;

/// Launches `config.requests` executions at the configured pace and gathers
/// their outcomes into the aggregator.
///
/// A dispatcher moves `NotStarted -> Running -> Completed | Interrupted` and
/// runs only once.
pub struct Dispatcher<E> {
    config: RunConfig,
    executor: Arc<E>,
    aggregator: Arc<Aggregator>,
    phase: RunPhase,
}

impl<E> Dispatcher<E>
where
    E: Executor + 'static,
{
    #[must_use]
    pub const fn new(config: RunConfig, executor: Arc<E>, aggregator: Arc<Aggregator>) -> Self {
        Self {
            config,
            executor,
            aggregator,
            phase: RunPhase::NotStarted,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Runs the load test until every launched request finished or shutdown
    /// was requested.
    ///
    /// `shutdown_rx` should be subscribed before signal handling starts, so a
    /// shutdown requested during setup is still seen here. On shutdown no
    /// further requests are launched, in-flight requests are aborted and
    /// joined, and the returned stats cover what completed so far.
    ///
    /// # Errors
    ///
    /// Returns an error when the dispatcher was already started.
    pub async fn run(
        &mut self,
        mut shutdown_rx: ShutdownReceiver,
    ) -> Result<RunStats, DispatchError> {
        if self.phase != RunPhase::NotStarted {
            return Err(DispatchError::AlreadyStarted {
                phase: self.phase.as_str(),
            });
        }
        self.phase = RunPhase::Running;
        self.aggregator.start();

        let requests = self.config.requests;
        let pacer = LaunchPacer::new(self.config.rate);
        info!(
            "Dispatching {} requests at {} req/sec",
            requests, self.config.rate
        );
        match pacer.delay() {
            Some(delay) => debug!("Inter-launch delay: {:?}", delay),
            None => debug!("Launch pacing disabled"),
        }

        let mut in_flight = JoinSet::new();
        let mut launched: u64 = 0;
        let mut interrupted = shutdown_requested(&mut shutdown_rx);

        while !interrupted && launched < requests {
            spawn_execution(
                &mut in_flight,
                Arc::clone(&self.executor),
                Arc::clone(&self.aggregator),
            );
            launched = launched.saturating_add(1);

            interrupted = !pacer.pause(&mut shutdown_rx).await;
        }

        if !interrupted {
            interrupted = drain_in_flight(&mut in_flight, &mut shutdown_rx).await;
        }
        if interrupted {
            in_flight.shutdown().await;
            warn!(
                "Run interrupted after {} of {} launches",
                launched, requests
            );
        }

        let snapshot = self.aggregator.snapshot();
        self.phase = if interrupted {
            RunPhase::Interrupted
        } else {
            RunPhase::Completed
        };
        info!(
            "Run {} with {} of {} requests completed in {:?}",
            self.phase.as_str(),
            snapshot.completed,
            requests,
            snapshot.elapsed
        );

        Ok(RunStats {
            requested: requests,
            launched,
            completed: snapshot.completed,
            duration: snapshot.elapsed,
            histogram: snapshot.histogram,
            interrupted,
        })
    }
}

/// Waits for every in-flight execution. Returns `true` when shutdown came
/// first.
async fn drain_in_flight(in_flight: &mut JoinSet<()>, shutdown_rx: &mut ShutdownReceiver) -> bool {
    loop {
        tokio::select! {
            joined = in_flight.join_next() => match joined {
                None => return false,
                Some(Ok(())) => {}
                Some(Err(err)) => warn!("Request task failed: {}", err),
            },
            () = wait_for_shutdown(shutdown_rx) => return true,
        }
    }
}
