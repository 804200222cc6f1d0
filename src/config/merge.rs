use super::env::{env_var, parse_env};
use super::yaml::YamlConfig;
use super::{ConfigError, DEFAULT_HOST, DEFAULT_PORT, ServerConfig};

/// Build the final configuration: YAML values win over environment variables,
/// which win over defaults.
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, ConfigError> {
    let yaml = yaml.unwrap_or_default();
    let server = yaml.server.unwrap_or_default();
    let storage = yaml.storage.unwrap_or_default();
    let aws = yaml.aws.unwrap_or_default();
    let synthesis = yaml.synthesis.unwrap_or_default();
    let errors = yaml.errors.unwrap_or_default();

    let host = server
        .host
        .or_else(|| env_var("HOST"))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match server.port {
        Some(port) => port,
        None => parse_env("PORT")?.unwrap_or(DEFAULT_PORT),
    };

    let polly_engine = match synthesis.engine {
        Some(engine) => Some(engine),
        None => parse_env("POLLY_ENGINE")?,
    };

    let markup_policy = match synthesis.markup_policy {
        Some(policy) => policy,
        None => parse_env("SSML_MARKUP_POLICY")?.unwrap_or_default(),
    };

    let error_status_policy = match errors.status_policy {
        Some(policy) => policy,
        None => parse_env("ERROR_STATUS_POLICY")?.unwrap_or_default(),
    };

    Ok(ServerConfig {
        host,
        port,
        audio_bucket: storage
            .bucket
            .or_else(|| env_var("AUDIO_BUCKET"))
            .unwrap_or_default(),
        audio_key_prefix: storage.key_prefix.or_else(|| env_var("AUDIO_KEY_PREFIX")),
        audio_s3_endpoint: storage.endpoint.or_else(|| env_var("AUDIO_S3_ENDPOINT")),
        aws_region: aws.region.or_else(|| env_var("AWS_REGION")),
        aws_access_key_id: aws.access_key_id.or_else(|| env_var("AWS_ACCESS_KEY_ID")),
        aws_secret_access_key: aws
            .secret_access_key
            .or_else(|| env_var("AWS_SECRET_ACCESS_KEY")),
        aws_session_token: aws.session_token.or_else(|| env_var("AWS_SESSION_TOKEN")),
        polly_engine,
        markup_policy,
        error_status_policy,
    })
}
