//! Error types for the smoke runner.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
