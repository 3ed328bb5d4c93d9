// src/error.rs
use thiserror::Error;

/// Anything that stops a backend call from producing a decoded body.
/// The dispatcher absorbs all of these by falling back.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid backend endpoint: {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("endpoint URL '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("{key} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to write transcript: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),
}
