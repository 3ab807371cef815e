use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration;
use crate::error::ValidationError;

/// Settings read from `paceload.toml` / `paceload.json`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub requests: Option<u64>,
    pub rate: Option<f64>,
    pub url: Option<String>,
    pub timeout: Option<DurationValue>,
    pub export_json: Option<String>,
    pub no_color: Option<bool>,
}

/// Either a bare number of seconds or a duration string such as `"500ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
