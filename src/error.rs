//! Error types for assistant operations

use thiserror::Error;

/// Errors produced by the assistant's core components
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Invalid argument passed to a fail-fast API (memory, explainer)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error (missing or inconsistent settings)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Query could not be resolved to a ticker symbol
    #[error("Could not identify stock for '{0}'")]
    SymbolNotFound(String),

    /// Remote service returned an explicit error payload
    #[error("API error: {0}")]
    ApiError(String),

    /// Rate limit exceeded for a data provider
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Response arrived but required fields were missing
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed or unknown REPL command
    #[error("Command error: {0}")]
    CommandError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;
