use std::fmt;
use std::time::Duration;

use crate::error::ValidationError;

/// Launch pace in requests per second.
///
/// Any finite value is accepted. Values `<= 0` mean the dispatcher launches
/// without pausing between requests.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LaunchRate(f64);

impl LaunchRate {
    /// Builds a launch rate from a requests-per-second value.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is NaN or infinite.
    pub fn new(per_sec: f64) -> Result<Self, ValidationError> {
        if per_sec.is_finite() {
            Ok(Self(per_sec))
        } else {
            Err(ValidationError::RateNotFinite {
                value: per_sec.to_string(),
            })
        }
    }

    #[must_use]
    pub fn is_throttled(self) -> bool {
        self.0 > 0.0
    }

    /// Fixed pause after each launch, or `None` when launches are not paced.
    ///
    /// Rates so high that the pause rounds to zero count as unthrottled; rates
    /// so low that the pause overflows saturate to `Duration::MAX`.
    #[must_use]
    pub fn launch_delay(self) -> Option<Duration> {
        if !self.is_throttled() {
            return None;
        }
        let delay = Duration::try_from_secs_f64(self.0.recip()).unwrap_or(Duration::MAX);
        if delay.is_zero() { None } else { Some(delay) }
    }
}

impl fmt::Display for LaunchRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable parameters of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub requests: u64,
    pub rate: LaunchRate,
}

impl RunConfig {
    #[must_use]
    pub const fn new(requests: u64, rate: LaunchRate) -> Self {
        Self { requests, rate }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    NotStarted,
    Running,
    Completed,
    Interrupted,
}

impl RunPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunPhase::NotStarted => "not-started",
            RunPhase::Running => "running",
            RunPhase::Completed => "completed",
            RunPhase::Interrupted => "interrupted",
        }
    }
}
