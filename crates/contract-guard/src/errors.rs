//! Error taxonomy for the review pipeline.
//!
//! | Error             | Fatal | Handling                                         |
//! |-------------------|-------|--------------------------------------------------|
//! | `ConfigError`     | yes   | reported on stdout, process exits with code 1    |
//! | `ExtractionError` | no    | replaced by a diagnostic string, pipeline continues |
//! | `CompletionError` | no    | rendered inline as the agent's answer             |
//!
//! Nothing is retried. Every stage always produces some text.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Prefix of every answer produced from a failed completion.
pub const API_ERROR_MARKER: &str = "API Error:";

/// Prefix of the text substituted for an unreadable contract.
pub const EXTRACTION_ERROR_MARKER: &str = "Error reading PDF:";

/// Startup configuration problems. These abort before any pipeline work.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API credential is absent, blank, or still the placeholder value.
    #[error("API key missing. Please set the {var} environment variable.")]
    MissingCredential { var: &'static str },

    /// A configuration value could not be parsed.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Failure to obtain text from the contract document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pdf(#[from] lopdf::Error),
}

impl ExtractionError {
    /// Text handed to the analyst in place of the contract body.
    pub fn diagnostic(&self) -> String {
        format!("{EXTRACTION_ERROR_MARKER} {self}")
    }
}

/// Failure reported by the completion collaborator for a single `send`.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Network or backend failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Quota exhausted or rate limited by the provider.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The provider answered with something that could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No answer within the configured request timeout.
    #[error("no response within {}s", .0.as_secs())]
    Timeout(Duration),
}

impl CompletionError {
    /// Classify a raw provider error message.
    pub fn from_provider_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("429") || lower.contains("quota") || lower.contains("rate limit") {
            Self::RateLimited(message)
        } else if lower.contains("json")
            || lower.contains("decode")
            || lower.contains("parse")
            || lower.contains("no candidates")
        {
            Self::MalformedResponse(message)
        } else {
            Self::Transport(message)
        }
    }

    /// The inline text an agent returns in place of a real answer.
    pub fn inline(&self) -> String {
        format!("{API_ERROR_MARKER} {self}")
    }
}

/// Returns `true` if `text` is an inline completion failure.
pub fn is_error_reply(text: &str) -> bool {
    text.starts_with(API_ERROR_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_messages_are_rate_limited() {
        let err = CompletionError::from_provider_message("HTTP 429: Resource has been exhausted (e.g. check quota).");
        assert!(matches!(err, CompletionError::RateLimited(_)));
    }

    #[test]
    fn decode_messages_are_malformed() {
        let err = CompletionError::from_provider_message("ResponseError: failed to decode JSON body");
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[test]
    fn other_messages_are_transport() {
        let err = CompletionError::from_provider_message("connection reset by peer");
        assert!(matches!(err, CompletionError::Transport(_)));
    }

    #[test]
    fn inline_text_carries_marker() {
        let text = CompletionError::Timeout(Duration::from_secs(30)).inline();
        assert!(is_error_reply(&text));
        assert!(text.contains("30s"));
    }

    #[test]
    fn extraction_diagnostic_names_path() {
        let err = ExtractionError::NotFound(PathBuf::from("missing.pdf"));
        let text = err.diagnostic();
        assert!(text.starts_with(EXTRACTION_ERROR_MARKER));
        assert!(text.contains("missing.pdf"));
    }

    #[test]
    fn missing_credential_names_variable() {
        let err = ConfigError::MissingCredential { var: "GOOGLE_API_KEY" };
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }
}
