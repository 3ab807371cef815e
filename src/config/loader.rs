use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

const DEFAULT_TOML_PATH: &str = "paceload.toml";
const DEFAULT_JSON_PATH: &str = "paceload.json";

/// Loads a configuration file from the provided path or default locations.
///
/// Without an explicit path the working directory is searched first, then its
/// parent, each for `paceload.toml` before `paceload.json`.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        let path = PathBuf::from(path);
        return Ok(Some(load_config_file(&path)?));
    }

    match find_config_in(Path::new(".")) {
        Some(path) => Ok(Some(load_config_file(&path)?)),
        None => Ok(None),
    }
}

pub(crate) fn find_config_in(base: &Path) -> Option<PathBuf> {
    [base.to_path_buf(), base.join("..")]
        .into_iter()
        .flat_map(|dir| [dir.join(DEFAULT_TOML_PATH), dir.join(DEFAULT_JSON_PATH)])
        .find(|path| path.is_file())
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
