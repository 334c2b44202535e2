//! Structured error types for esstat
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

/// A refresh cycle could not produce a usable snapshot.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} answered HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("malformed payload from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No valid data received from Elasticsearch")]
    MissingClusterName,
}

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Terminal error: {0}")]
    Setup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("host must not be empty")]
    EmptyHost,

    #[error("unsupported scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}
