//! Error types for the agent roster, chat calls and deploy logs

use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading the agent registry
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Team configuration file could not be read
    #[error("Failed to read team configuration {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("Team configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field is absent or has the wrong type
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Credential sourcing is ambiguous or unresolvable
    #[error("Invalid credential for participant {participant}: {reason}")]
    Credential { participant: String, reason: String },
}

/// Errors from a single chat-completion call
#[derive(Debug, Error)]
pub enum LlmError {
    /// Credential missing or rejected
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Response decoded but carried no completion text
    #[error("Completion contained no choices")]
    EmptyCompletion,

    /// Call exceeded its time bound
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            LlmError::Network(format!("Connection error: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

/// Errors while persisting a deployment record
#[derive(Debug, Error)]
pub enum DeployLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for registry loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;
