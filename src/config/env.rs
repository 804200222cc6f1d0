use std::env;
use std::fmt::Display;
use std::str::FromStr;

use super::ConfigError;

/// Read an environment variable, treating blank values as unset.
pub(super) fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable.
pub(super) fn parse_env<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    env_var(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("'{raw}': {e}"),
            })
        })
        .transpose()
}
