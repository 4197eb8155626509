//! Error types for the concentration crate.
//!
//! The match engine and deck generator never fail: invalid player input is
//! ignored, not reported. Errors come only from the edges of the crate:
//! configuration loading, the item provider, and the session task.

use thiserror::Error;

/// Main error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        field: String,
    },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Session error: {0}")]
    Session(String),
}

/// Failures talking to an item provider.
///
/// Providers fail soft at their public entry point; these errors surface
/// only through the fallible `try_*` calls and the log.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response status: {status}")]
    Status { status: u16 },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a configuration error for a named field.
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: field.into(),
        }
    }
}
