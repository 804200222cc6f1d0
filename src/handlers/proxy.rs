//! Serverless HTTP-trigger envelope.
//!
//! Function platforms deliver an HTTP request as a JSON event and expect a
//! JSON description of the response back. [`SpeakService::handle_event`]
//! runs one such event through the same pipeline the HTTP route uses.

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::speak::{SpeakResponse, SpeakService};
use crate::errors::SpeakError;
use crate::middleware::cors::CORS_HEADERS;

/// Inbound proxy event. Only the fields the endpoint needs are modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ProxyEvent {
    /// Event carrying a plain JSON body.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            http_method: Some("POST".to_string()),
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// Body as text, decoding base64 when flagged.
    pub fn decoded_body(&self) -> Result<Option<String>, SpeakError> {
        let Some(body) = &self.body else {
            return Ok(None);
        };

        if !self.is_base64_encoded {
            return Ok(Some(body.clone()));
        }

        let bytes = BASE64.decode(body.trim()).map_err(|e| {
            SpeakError::MalformedInput(format!("request body is not valid base64: {e}"))
        })?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| SpeakError::MalformedInput(format!("request body is not valid UTF-8: {e}")))
    }

    fn is_preflight(&self) -> bool {
        self.http_method
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("OPTIONS"))
    }
}

/// Outbound proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    fn with_cors(status_code: u16, body: String) -> Self {
        let headers = CORS_HEADERS
            .iter()
            .map(|(name, value)| (cors_header_title(name.as_str()), value.to_string()))
            .collect();
        Self {
            status_code,
            headers,
            body,
        }
    }
}

impl From<SpeakResponse> for ProxyResponse {
    fn from(response: SpeakResponse) -> Self {
        Self::with_cors(response.status.as_u16(), response.body_json())
    }
}

/// `access-control-allow-origin` -> `Access-Control-Allow-Origin`
fn cors_header_title(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

impl SpeakService {
    /// Handle one proxy event end to end.
    pub async fn handle_event(&self, event: &ProxyEvent) -> ProxyResponse {
        if event.is_preflight() {
            debug!("Answering preflight event");
            return ProxyResponse::with_cors(200, String::new());
        }

        match event.decoded_body() {
            Ok(body) => self.handle(body.as_deref()).await.into(),
            Err(err) => self.fail(err).into(),
        }
    }
}
