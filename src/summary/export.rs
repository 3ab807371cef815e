use chrono::{SecondsFormat, Utc};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::metrics::RunStats;

use super::{compute_summary_stats, format_x100};

/// JSON document written by `--export-json`.
#[must_use]
pub fn export_payload(stats: &RunStats) -> serde_json::Value {
    let summary = compute_summary_stats(stats);
    let histogram: Vec<serde_json::Value> = stats
        .histogram
        .sorted_entries()
        .into_iter()
        .map(|(key, count)| {
            serde_json::json!({
                "code": key.to_string(),
                "count": count
            })
        })
        .collect();

    serde_json::json!({
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "requested": stats.requested,
        "launched": stats.launched,
        "completed": stats.completed,
        "duration_ms": u64::try_from(stats.duration.as_millis()).unwrap_or(u64::MAX),
        "success_rate": format_x100(summary.success_rate_x100),
        "interrupted": stats.interrupted,
        "histogram": histogram
    })
}

/// Writes the report as pretty JSON to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn export_json(path: &str, stats: &RunStats) -> Result<(), std::io::Error> {
    let payload = export_payload(stats);
    let json = serde_json::to_vec_pretty(&payload).map_err(std::io::Error::other)?;

    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
