use super::ConfigError;

/// The audio bucket is a startup precondition.
pub(super) fn validate_bucket(bucket: &str) -> Result<(), ConfigError> {
    let bucket = bucket.trim();
    if bucket.is_empty() {
        return Err(ConfigError::MissingBucket);
    }
    if bucket.contains('/') || bucket.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            key: "AUDIO_BUCKET",
            message: format!("'{bucket}' is not a valid bucket name"),
        });
    }
    Ok(())
}

/// Custom endpoints must carry an explicit scheme.
pub(super) fn validate_endpoint(endpoint: &Option<String>) -> Result<(), ConfigError> {
    match endpoint {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
            Err(ConfigError::InvalidValue {
                key: "AUDIO_S3_ENDPOINT",
                message: format!("'{url}' must start with http:// or https://"),
            })
        }
        _ => Ok(()),
    }
}

/// Key prefixes become object path segments and may not escape them.
pub(super) fn validate_key_prefix(prefix: &Option<String>) -> Result<(), ConfigError> {
    let Some(prefix) = prefix else {
        return Ok(());
    };

    let trimmed = prefix.trim().trim_matches('/');
    if trimmed
        .split('/')
        .any(|segment| segment == ".." || segment == "." || (segment.is_empty() && !trimmed.is_empty()))
    {
        return Err(ConfigError::InvalidValue {
            key: "AUDIO_KEY_PREFIX",
            message: format!("'{prefix}' contains empty or relative path segments"),
        });
    }
    Ok(())
}
