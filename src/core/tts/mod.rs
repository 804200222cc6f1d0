pub mod aws_polly;
mod base;

pub use aws_polly::{AWS_POLLY_TTS_URL, AwsPollyConfig, AwsPollySynthesizer, PollyEngine};
pub use base::{SpeechSynthesizer, SynthesisInput, TTSError, TTSResult, TextType};
