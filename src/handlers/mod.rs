//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `speak` - Text-to-speech endpoint returning a signed audio URL
//! - `proxy` - Serverless HTTP-trigger event adapter for the speak endpoint

pub mod api;
pub mod proxy;
pub mod speak;

pub use proxy::{ProxyEvent, ProxyResponse};
pub use speak::{SpeakResponse, SpeakService, speak_handler};
