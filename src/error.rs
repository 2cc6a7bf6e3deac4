//! Error types for Newsdesk.

use thiserror::Error;

/// Common error type for Newsdesk.
#[derive(Error, Debug)]
pub enum NewsdeskError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for configuration or input values.
    #[error("validation error: {0}")]
    Validation(String),

    /// RSS feed error.
    #[error("RSS error: {0}")]
    Rss(String),

    /// Language model backend error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// System prompt error.
    #[error("prompt error: {0}")]
    Prompt(String),
}

/// Result type alias for Newsdesk operations.
pub type Result<T> = std::result::Result<T, NewsdeskError>;
