//! Final report: fixed-point statistics, text lines, and JSON export.
mod export;
mod lines;


pub use export::{export_json, export_payload};
pub use lines::{print_report, render_report, start_line};

use crate::metrics::RunStats;

/// Divisor for values stored in hundredths.
pub(crate) const PERCENT_DIVISOR: u64 = 100;
/// One hundred percent in hundredths.
const FULL_PERCENT_X100: u64 = 10_000;

/// Report figures in hundredths, so they print with two decimals without
/// floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    pub success_rate_x100: u64,
    pub other_rate_x100: u64,
    pub avg_rps_x100: u64,
    pub duration_x100: u64,
}

/// Derives the report figures. Rates are relative to the requested total;
/// throughput counts completed requests over the measured duration. Every
/// division by zero yields 0.
#[must_use]
pub fn compute_summary_stats(stats: &RunStats) -> SummaryStats {
    let success_rate_x100 = share_x100(stats.success_count(), stats.requested);
    let other_rate_x100 = if stats.requested > 0 {
        FULL_PERCENT_X100.saturating_sub(success_rate_x100)
    } else {
        0
    };

    let avg_rps_x100 = u128::from(stats.completed)
        .saturating_mul(100_000_000)
        .checked_div(stats.duration.as_micros())
        .unwrap_or(0);
    let duration_x100 = stats.duration.as_millis().checked_div(10).unwrap_or(0);

    SummaryStats {
        success_rate_x100,
        other_rate_x100,
        avg_rps_x100: u64::try_from(avg_rps_x100).unwrap_or(u64::MAX),
        duration_x100: u64::try_from(duration_x100).unwrap_or(u64::MAX),
    }
}

/// `part / whole * 100` in hundredths; 0 when `whole` is 0.
pub(crate) fn share_x100(part: u64, whole: u64) -> u64 {
    let scaled = u128::from(part)
        .saturating_mul(u128::from(FULL_PERCENT_X100))
        .checked_div(u128::from(whole))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Formats a hundredths value as `X.YY`.
pub(crate) fn format_x100(value: u64) -> String {
    format!(
        "{}.{:02}",
        value / PERCENT_DIVISOR,
        value % PERCENT_DIVISOR
    )
}
