use crate::domain::RunConfig;
use crate::metrics::{RunStats, SUCCESS_STATUS};

use super::{compute_summary_stats, format_x100, share_x100};

#[must_use]
pub fn start_line(config: &RunConfig) -> String {
    format!(
        "Starting load test with {} requests at {} req/sec",
        config.requests, config.rate
    )
}

/// Report lines for a finished or interrupted run. Rendering is pure: the same
/// stats always produce the same lines.
#[must_use]
pub fn render_report(stats: &RunStats) -> Vec<String> {
    let summary = compute_summary_stats(stats);
    let mut lines = Vec::new();

    lines.push("===== Load Test Results =====".to_owned());
    lines.push(format!("Total requests: {}", stats.requested));
    lines.push(format!(
        "Test duration: {} seconds",
        format_x100(summary.duration_x100)
    ));
    lines.push(format!(
        "Average throughput: {} completed requests/second",
        format_x100(summary.avg_rps_x100)
    ));
    if stats.interrupted {
        lines.push(format!(
            "Completed before interrupt: {} of {} ({} launched)",
            stats.completed, stats.requested, stats.launched
        ));
    }

    lines.push(String::new());
    lines.push("Response Code Summary:".to_owned());
    for (key, count) in stats.histogram.sorted_entries() {
        lines.push(format!(
            "  HTTP {}: {} ({}%)",
            key,
            count,
            format_x100(share_x100(count, stats.requested))
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Success rate (HTTP {}): {}%",
        SUCCESS_STATUS,
        format_x100(summary.success_rate_x100)
    ));
    lines.push(format!(
        "Other responses: {}%",
        format_x100(summary.other_rate_x100)
    ));
    lines
}

pub fn print_report(stats: &RunStats) {
    println!();
    for line in render_report(stats) {
        println!("{}", line);
    }
}
