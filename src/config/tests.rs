use super::{
    apply_config, find_config_in, load_config_file,
    types::{ConfigFile, DurationValue},
};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::LoadArgs;
use crate::error::{AppError, ConfigError};

fn parse_with_matches(argv: &[&str]) -> Result<(LoadArgs, clap::ArgMatches), String> {
    let matches = LoadArgs::command()
        .try_get_matches_from(argv.iter().copied())
        .map_err(|err| format!("parse args failed: {}", err))?;
    let args = LoadArgs::from_arg_matches(&matches)
        .map_err(|err| format!("parse args failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("paceload.toml");
    let content = r#"
requests = 40
rate = 2.5
url = "http://localhost:3000/options"
timeout = "750ms"
export_json = "report.json"
no_color = true
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.requests != Some(40) {
        return Err("Unexpected requests".to_owned());
    }
    if config.url.as_deref() != Some("http://localhost:3000/options") {
        return Err("Unexpected url".to_owned());
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| "Expected timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_millis(750) {
        return Err(format!("Unexpected timeout: {:?}", timeout));
    }
    if config.export_json.as_deref() != Some("report.json") || config.no_color != Some(true) {
        return Err("Unexpected export_json or no_color".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config_with_numeric_timeout() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("paceload.json");
    let content = r#"{ "requests": 5, "rate": 0, "timeout": 3 }"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.requests != Some(5) {
        return Err("Unexpected requests".to_owned());
    }
    match config.timeout {
        Some(DurationValue::Seconds(3)) => Ok(()),
        other => Err(format!("Unexpected timeout: {:?}", other)),
    }
}

#[test]
fn config_values_fill_unset_flags() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["paceload"])?;
    let config = ConfigFile {
        requests: Some(12),
        rate: Some(4.0),
        url: Some("http://127.0.0.1:9000/".to_owned()),
        timeout: Some(DurationValue::Text("2s".to_owned())),
        export_json: Some("out.json".to_owned()),
        no_color: None,
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.requests != 12 {
        return Err(format!("Unexpected requests: {}", args.requests));
    }
    if args.rate.launch_delay() != Some(Duration::from_millis(250)) {
        return Err(format!("Unexpected rate: {}", args.rate));
    }
    if args.url != "http://127.0.0.1:9000/" {
        return Err(format!("Unexpected url: {}", args.url));
    }
    if args.request_timeout != Duration::from_secs(2) {
        return Err(format!("Unexpected timeout: {:?}", args.request_timeout));
    }
    if args.export_json.as_deref() != Some("out.json") {
        return Err("Unexpected export_json".to_owned());
    }
    Ok(())
}

#[test]
fn command_line_flags_override_config() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&[
        "paceload",
        "--requests",
        "3",
        "--rate",
        "0",
        "--timeout",
        "1s",
    ])?;
    let config = ConfigFile {
        requests: Some(500),
        rate: Some(50.0),
        timeout: Some(DurationValue::Seconds(30)),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.requests != 3 {
        return Err(format!("CLI requests should win, got {}", args.requests));
    }
    if args.rate.is_throttled() {
        return Err("CLI rate should win".to_owned());
    }
    if args.request_timeout != Duration::from_secs(1) {
        return Err("CLI timeout should win".to_owned());
    }
    Ok(())
}

#[test]
fn config_no_color_applies_without_env() -> Result<(), String> {
    if std::env::var_os("NO_COLOR").is_some() {
        return Ok(());
    }
    let (mut args, matches) = parse_with_matches(&["paceload"])?;
    let config = ConfigFile {
        no_color: Some(true),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;
    if !args.no_color {
        return Err("Expected no_color from config".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_non_finite_rate() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("paceload.toml");
    std::fs::write(&path, "rate = nan\n").map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let (mut args, matches) = parse_with_matches(&["paceload"])?;
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::InvalidField { field: "rate", .. })) => Ok(()),
        other => Err(format!("Expected invalid rate, got {:?}", other)),
    }
}

#[test]
fn config_rejects_zero_timeout() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["paceload"])?;
    let config = ConfigFile {
        timeout: Some(DurationValue::Seconds(0)),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Err(AppError::Config(ConfigError::InvalidField {
            field: "timeout", ..
        })) => Ok(()),
        other => Err(format!("Expected invalid timeout, got {:?}", other)),
    }
}

#[test]
fn load_config_file_rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("paceload.yaml");
    std::fs::write(&path, "requests: 1\n").map_err(|err| format!("write failed: {}", err))?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        other => Err(format!("Expected unsupported extension, got {:?}", other)),
    }
}

#[test]
fn load_config_file_reports_parse_errors() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("paceload.json");
    std::fs::write(&path, "{ not json").map_err(|err| format!("write failed: {}", err))?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::ParseJson { .. })) => Ok(()),
        other => Err(format!("Expected JSON parse error, got {:?}", other)),
    }
}

#[test]
fn config_search_prefers_working_directory_toml() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).map_err(|err| format!("mkdir failed: {}", err))?;
    std::fs::write(dir.path().join("paceload.toml"), "requests = 1\n")
        .map_err(|err| format!("write failed: {}", err))?;
    std::fs::write(sub.join("paceload.json"), "{}").map_err(|err| format!("write failed: {}", err))?;
    std::fs::write(sub.join("paceload.toml"), "requests = 2\n")
        .map_err(|err| format!("write failed: {}", err))?;

    match find_config_in(&sub) {
        Some(path) if path == sub.join("paceload.toml") => Ok(()),
        other => Err(format!("Expected sub/paceload.toml, got {:?}", other)),
    }
}

#[test]
fn config_search_falls_back_to_parent_directory() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).map_err(|err| format!("mkdir failed: {}", err))?;
    if find_config_in(&sub).is_some() {
        return Err("Empty directories should not yield a config".to_owned());
    }

    std::fs::write(dir.path().join("paceload.json"), r#"{ "requests": 9 }"#)
        .map_err(|err| format!("write failed: {}", err))?;
    let path = find_config_in(&sub).ok_or_else(|| "Expected parent config".to_owned())?;
    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.requests != Some(9) {
        return Err(format!("Unexpected requests: {:?}", config.requests));
    }
    Ok(())
}
