use std::fmt;
use std::time::Duration;

use super::ResultHistogram;

/// Status code counted as a success in the report.
pub const SUCCESS_STATUS: u16 = 200;

/// Classified result of one request attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Status(u16),
    Error(String),
}

impl Outcome {
    #[must_use]
    pub const fn key(&self) -> OutcomeKey {
        match self {
            Outcome::Status(code) => OutcomeKey::Status(*code),
            Outcome::Error(_) => OutcomeKey::Error,
        }
    }
}

/// Histogram bucket. Transport errors share one `Error` bucket; their messages
/// are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKey {
    Status(u16),
    Error,
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKey::Status(code) => write!(f, "{}", code),
            OutcomeKey::Error => f.write_str("Error"),
        }
    }
}

/// Final, read-only summary of a completed or interrupted run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Requests the run was configured to issue.
    pub requested: u64,
    pub launched: u64,
    pub completed: u64,
    pub duration: Duration,
    pub histogram: ResultHistogram,
    pub interrupted: bool,
}

impl RunStats {
    #[must_use]
    pub fn success_count(&self) -> u64 {
        self.histogram.count(OutcomeKey::Status(SUCCESS_STATUS))
    }
}
