//! Amazon Polly TTS provider module.
//!
//! Synthesizes SSML or plain text into a single audio payload using the
//! SynthesizeSpeech API.
//!
//! # Authentication
//!
//! AWS credentials can be provided via:
//! 1. `aws_access_key_id` and `aws_secret_access_key` in config
//! 2. Environment variables: `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
//! 3. AWS credentials file (`~/.aws/credentials`)
//! 4. IAM role of the execution environment (EC2/ECS/Lambda)
//!
//! # Limits
//!
//! Polly bills at most 3000 characters per request and rejects input longer
//! than 6000 characters including SSML tags. The synthesizer enforces the
//! 6000 character ceiling locally and leaves every other check to the service.

mod config;
mod provider;


pub use config::{
    AwsPollyConfig, DEFAULT_AWS_REGION, MAX_TOTAL_LENGTH, PollyEngine, PollyOutputFormat,
};
pub use provider::{AWS_POLLY_TTS_URL, AwsPollySynthesizer};
