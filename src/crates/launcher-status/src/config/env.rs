//! `LAUNCHER_STATUS_*` environment overrides

use crate::error::{Result, StatusError};
use std::env;
use std::str::FromStr;

/// Variable name for a config field, e.g. `timeout_ms` under
/// `LAUNCHER_STATUS_` is `LAUNCHER_STATUS_TIMEOUT_MS`.
pub fn override_key(prefix: &str, field: &str) -> String {
    format!("{}{}", prefix, field.to_ascii_uppercase())
}

/// Raw override for `field`. Unset and blank variables both yield `None`.
pub fn read_override(prefix: &str, field: &str) -> Result<Option<String>> {
    let key = override_key(prefix, field);
    match env::var(&key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(StatusError::Config(format!("{} is not valid UTF-8", key)))
        }
    }
}

/// Override for `field` parsed into `T`.
pub fn read_override_parsed<T>(prefix: &str, field: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = read_override(prefix, field)? else {
        return Ok(None);
    };

    raw.parse::<T>().map(Some).map_err(|e| {
        StatusError::Config(format!(
            "{}={:?} is not a valid {}: {}",
            override_key(prefix, field),
            raw,
            field,
            e
        ))
    })
}
