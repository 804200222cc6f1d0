//! SSML wrapping for speed control.
//!
//! Request text is wrapped as `<speak><prosody rate="{speed}">{text}</prosody></speak>`.
//! Under [`MarkupPolicy::Passthrough`] both values are embedded verbatim, so a
//! caller can inject arbitrary SSML. [`MarkupPolicy::Sanitize`] escapes the
//! text and only accepts known rate values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named prosody rates accepted by SSML engines.
pub const RATE_DESCRIPTORS: &[&str] = &["x-slow", "slow", "medium", "fast", "x-fast", "default"];

/// Percentage bounds accepted for a numeric rate (`"150%"`).
pub const MIN_RATE_PERCENT: u32 = 20;
pub const MAX_RATE_PERCENT: u32 = 200;

/// How request values are embedded into the SSML wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupPolicy {
    /// Embed text and rate verbatim
    #[default]
    Passthrough,
    /// Escape text and restrict rate to known values
    Sanitize,
}

impl std::str::FromStr for MarkupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passthrough" | "raw" => Ok(Self::Passthrough),
            "sanitize" | "strict" => Ok(Self::Sanitize),
            other => Err(format!(
                "Unknown markup policy '{other}'. Expected 'passthrough' or 'sanitize'"
            )),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("Unsupported speed '{0}'. Expected one of x-slow, slow, medium, fast, x-fast, default, or a percentage between 20% and 200%")]
    UnsupportedRate(String),
}

/// Wrap `text` in a `<speak>` document carrying a prosody rate.
pub fn wrap_with_prosody(
    text: &str,
    speed: &str,
    policy: MarkupPolicy,
) -> Result<String, MarkupError> {
    match policy {
        MarkupPolicy::Passthrough => Ok(format!(
            r#"<speak><prosody rate="{speed}">{text}</prosody></speak>"#
        )),
        MarkupPolicy::Sanitize => {
            if !is_supported_rate(speed) {
                return Err(MarkupError::UnsupportedRate(speed.to_string()));
            }
            Ok(format!(
                r#"<speak><prosody rate="{speed}">{}</prosody></speak>"#,
                escape_text(text)
            ))
        }
    }
}

/// Whether `speed` is a named rate or an in-range percentage.
pub fn is_supported_rate(speed: &str) -> bool {
    if RATE_DESCRIPTORS.contains(&speed) {
        return true;
    }

    speed
        .strip_suffix('%')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u32>().ok())
        .is_some_and(|pct| (MIN_RATE_PERCENT..=MAX_RATE_PERCENT).contains(&pct))
}

/// Escape XML special characters.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_wraps_verbatim() {
        let ssml = wrap_with_prosody("Hello world", "medium", MarkupPolicy::Passthrough).unwrap();
        assert_eq!(
            ssml,
            r#"<speak><prosody rate="medium">Hello world</prosody></speak>"#
        );
    }

    #[test]
    fn test_passthrough_does_not_escape() {
        let ssml = wrap_with_prosody(
            "a <break time=\"1s\"/> b",
            "fast\" volume=\"loud",
            MarkupPolicy::Passthrough,
        )
        .unwrap();
        assert_eq!(
            ssml,
            r#"<speak><prosody rate="fast" volume="loud">a <break time="1s"/> b</prosody></speak>"#
        );
    }

    #[test]
    fn test_sanitize_escapes_text() {
        let ssml = wrap_with_prosody("Tom & Jerry <3", "slow", MarkupPolicy::Sanitize).unwrap();
        assert_eq!(
            ssml,
            r#"<speak><prosody rate="slow">Tom &amp; Jerry &lt;3</prosody></speak>"#
        );
    }

    #[test]
    fn test_sanitize_rejects_attribute_breakout() {
        let err = wrap_with_prosody("hi", "fast\" volume=\"loud", MarkupPolicy::Sanitize)
            .unwrap_err();
        assert!(matches!(err, MarkupError::UnsupportedRate(_)));
    }

    #[test]
    fn test_supported_rates() {
        for rate in RATE_DESCRIPTORS {
            assert!(is_supported_rate(rate), "{rate} should be supported");
        }
        assert!(is_supported_rate("20%"));
        assert!(is_supported_rate("150%"));
        assert!(is_supported_rate("200%"));
        assert!(!is_supported_rate("19%"));
        assert!(!is_supported_rate("201%"));
        assert!(!is_supported_rate("%"));
        assert!(!is_supported_rate("+50%"));
        assert!(!is_supported_rate("Medium"));
        assert!(!is_supported_rate(""));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("sanitize".parse::<MarkupPolicy>(), Ok(MarkupPolicy::Sanitize));
        assert_eq!(" Passthrough ".parse::<MarkupPolicy>(), Ok(MarkupPolicy::Passthrough));
        assert!("escape".parse::<MarkupPolicy>().is_err());
    }
}
