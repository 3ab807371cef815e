use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::progress::{Progress, ProgressReporter};

use super::{Outcome, ResultHistogram};

/// Progress is reported every this many completions, and on the last one.
const PROGRESS_EVERY: u64 = 10;

struct AggregatorState {
    histogram: ResultHistogram,
    completed: u64,
    started_at: Option<Instant>,
}

/// Point-in-time copy of the aggregator state.
#[derive(Debug, Clone)]
pub struct AggregateSnapshot {
    pub histogram: ResultHistogram,
    pub completed: u64,
    pub elapsed: Duration,
}

/// Owns the histogram, the completed counter, and the run start time.
///
/// Every completion goes through one critical section: histogram increment,
/// counter increment and the optional progress report happen under the same
/// lock, so progress lines never interleave.
pub struct Aggregator {
    total: u64,
    state: Mutex<AggregatorState>,
    progress: Arc<dyn ProgressReporter>,
}

impl Aggregator {
    #[must_use]
    pub fn new(total: u64, progress: Arc<dyn ProgressReporter>) -> Self {
        Self {
            total,
            state: Mutex::new(AggregatorState {
                histogram: ResultHistogram::new(),
                completed: 0,
                started_at: None,
            }),
            progress,
        }
    }

    /// Marks the start of the run. Later calls keep the first timestamp.
    pub fn start(&self) -> Instant {
        let mut state = self.lock();
        *state.started_at.get_or_insert_with(Instant::now)
    }

    /// Records one finished request and returns the new completed count.
    pub fn record(&self, outcome: &Outcome) -> u64 {
        let mut state = self.lock();
        state.histogram.increment(outcome.key());
        state.completed = state.completed.saturating_add(1);
        let completed = state.completed;

        if should_report(completed, self.total) {
            let elapsed = elapsed_since(state.started_at);
            self.progress
                .report(&Progress::new(completed, self.total, elapsed));
        }
        completed
    }

    #[must_use]
    pub fn snapshot(&self) -> AggregateSnapshot {
        let state = self.lock();
        AggregateSnapshot {
            histogram: state.histogram.clone(),
            completed: state.completed,
            elapsed: elapsed_since(state.started_at),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn should_report(completed: u64, total: u64) -> bool {
    completed.checked_rem(PROGRESS_EVERY) == Some(0) || completed == total
}

fn elapsed_since(started_at: Option<Instant>) -> Duration {
    started_at.map_or(Duration::ZERO, |start| start.elapsed())
}
