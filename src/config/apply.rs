use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::LoadArgs;
use crate::domain::LaunchRate;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Precedence is command line,
/// then `PACELOAD_*`/`NO_COLOR` environment variables, then the file, then the
/// built-in defaults.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(args: &mut LoadArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_explicit(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_explicit(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = LaunchRate::new(rate).map_err(|err| invalid_field("rate", err))?;
    }

    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout
            .to_duration()
            .map_err(|err| invalid_field("timeout", err))?;
    }

    if !is_explicit(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_explicit(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn invalid_field(field: &'static str, source: crate::error::ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
