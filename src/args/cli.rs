use clap::Parser;
use std::time::Duration;

use crate::domain::{LaunchRate, RunConfig};
use crate::http::DEFAULT_TARGET_URL;

use super::defaults::{DEFAULT_RATE, DEFAULT_REQUESTS, DEFAULT_TIMEOUT};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_rate};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fires a fixed number of HTTP GET requests at a steady launch rate and reports the response code breakdown."
)]
pub struct LoadArgs {
    /// Total number of requests to send
    #[arg(long, short = 'n', env = "PACELOAD_REQUESTS", default_value_t = DEFAULT_REQUESTS)]
    pub requests: u64,

    /// Launch rate in requests per second (values <= 0 disable pacing)
    #[arg(
        long,
        short = 'r',
        env = "PACELOAD_RATE",
        default_value = DEFAULT_RATE,
        value_parser = parse_rate,
        allow_negative_numbers = true
    )]
    pub rate: LaunchRate,

    /// Target endpoint (the intent query parameter is always appended)
    #[arg(long, short = 'u', env = "PACELOAD_URL", default_value = DEFAULT_TARGET_URL)]
    pub url: String,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        env = "PACELOAD_TIMEOUT",
        default_value = DEFAULT_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Path to config file (TOML/JSON). Defaults to paceload.toml or paceload.json in the working directory or its parent.
    #[arg(long)]
    pub config: Option<String>,

    /// Write the final report as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by PACELOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl LoadArgs {
    #[must_use]
    pub const fn run_config(&self) -> RunConfig {
        RunConfig::new(self.requests, self.rate)
    }
}
