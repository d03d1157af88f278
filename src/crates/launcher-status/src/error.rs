//! Error types for status polling.

use thiserror::Error;

/// Result type for status operations.
pub type Result<T> = std::result::Result<T, StatusError>;

/// Errors that can occur while fetching, parsing or configuring status polling.
#[derive(Debug, Error)]
pub enum StatusError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The status endpoint answered with a non-success status code.
    #[error("Status endpoint returned HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body was not a recognised status document.
    #[error("Malformed status response: {0}")]
    Malformed(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client construction or usage error.
    #[error("Client error: {0}")]
    ClientError(String),

    /// `start` was called on a poller that is already running.
    #[error("Status poller is already running")]
    PollerAlreadyRunning,
}
