//! Progress lines emitted while requests complete.
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tracing::debug;

/// Completion progress at the moment a request finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
    pub elapsed: Duration,
}

impl Progress {
    #[must_use]
    pub const fn new(completed: u64, total: u64, elapsed: Duration) -> Self {
        Self {
            completed,
            total,
            elapsed,
        }
    }

    /// Completion percentage in tenths of a percent.
    #[must_use]
    pub fn percent_x10(&self) -> u64 {
        let scaled = u128::from(self.completed)
            .saturating_mul(1_000)
            .checked_div(u128::from(self.total))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Completed requests per second since the start, in tenths.
    #[must_use]
    pub fn rps_x10(&self) -> u64 {
        let scaled = u128::from(self.completed)
            .saturating_mul(10_000_000)
            .checked_div(self.elapsed.as_micros())
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    fn elapsed_tenths(&self) -> u128 {
        self.elapsed.as_millis().checked_div(100).unwrap_or(0)
    }

    fn segments(&self) -> [(String, Option<Color>); 3] {
        let percent = self.percent_x10();
        let rps = self.rps_x10();
        let tenths = self.elapsed_tenths();
        [
            (
                format!(
                    "Completed: {}/{} ({}.{}%)",
                    self.completed,
                    self.total,
                    percent / 10,
                    percent % 10
                ),
                None,
            ),
            (
                format!(" - {}.{} req/sec", rps / 10, rps % 10),
                Some(Color::Cyan),
            ),
            (
                format!(" - {}.{}s", tenths / 10, tenths % 10),
                Some(Color::Yellow),
            ),
        ]
    }

    /// Plain text form, e.g. `Completed: 4/10 (40.0%) - 8.0 req/sec - 0.5s`.
    #[must_use]
    pub fn line(&self) -> String {
        self.segments()
            .into_iter()
            .map(|(text, _)| text)
            .collect()
    }
}

/// Receives progress from inside the aggregation critical section.
///
/// Implementations must not block for long: every completion waits on the
/// same lock.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: &Progress);

    /// Called once after the run, so the next output starts on a fresh line.
    fn finish(&self) {}
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _progress: &Progress) {}
}

/// Writes progress to stderr. On a terminal the line is redrawn in place;
/// otherwise each update is its own line.
#[derive(Debug)]
pub struct TerminalProgress {
    interactive: bool,
    no_color: bool,
    drawn: AtomicBool,
}

impl TerminalProgress {
    #[must_use]
    pub fn new(no_color: bool) -> Self {
        Self {
            interactive: std::io::stderr().is_terminal(),
            no_color,
            drawn: AtomicBool::new(false),
        }
    }

    fn redraw(&self, progress: &Progress) -> Result<(), std::io::Error> {
        let mut out = std::io::stderr().lock();
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        for (text, color) in progress.segments() {
            match color {
                Some(color) if !self.no_color => {
                    queue!(out, SetForegroundColor(color), Print(&text), ResetColor)?;
                }
                Some(_) | None => queue!(out, Print(&text))?,
            }
        }
        out.flush()
    }

    fn append(progress: &Progress) -> Result<(), std::io::Error> {
        let mut out = std::io::stderr().lock();
        writeln!(out, "{}", progress.line())?;
        out.flush()
    }
}

impl ProgressReporter for TerminalProgress {
    fn report(&self, progress: &Progress) {
        let result = if self.interactive {
            self.drawn.store(true, Ordering::Relaxed);
            self.redraw(progress)
        } else {
            Self::append(progress)
        };
        if let Err(err) = result {
            debug!("Failed to write progress: {}", err);
        }
    }

    fn finish(&self) {
        if !self.drawn.swap(false, Ordering::Relaxed) {
            return;
        }
        let mut out = std::io::stderr().lock();
        if let Err(err) = out.write_all(b"\n").and_then(|()| out.flush()) {
            debug!("Failed to finish progress line: {}", err);
        }
    }
}
