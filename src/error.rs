use std::time::Duration;

use thiserror::Error;

/// Errors raised while talking to a terminology server.
///
/// `TerminologyClient::validate` never returns these to the caller; they are
/// folded into a fallback outcome whose message is the error's `Display`.
#[derive(Error, Debug)]
pub enum TerminologyError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Terminology server responded with status {status}")]
    Status { status: u16 },

    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Protocol error: {message}")]
    Protocol { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl TerminologyError {
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TerminologyError>;
