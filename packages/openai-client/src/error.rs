//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Missing API key or an HTTP client that could not be built
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never got a response
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("OpenAI returned {status} on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// A 2xx response without any choices
    #[error("OpenAI returned no choices for {0}")]
    EmptyResponse(String),

    /// Body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Audio file could not be read for upload
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpenAIError {
    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
