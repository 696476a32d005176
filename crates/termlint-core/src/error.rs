//! Error types for termlint-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while obtaining a style guide document.
///
/// Every variant is returned to the caller of
/// [`Analyzer::analyze`](crate::analyzer::Analyzer::analyze); none are retried.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("could not send request to the server: {0}")]
    Transport(#[source] reqwest::Error),

    /// The configured base URL cannot be used to build a request.
    #[error("invalid style guide URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status.
    #[error("error fetching style guide, http status: {status}")]
    Http {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The response body was not a usable style guide envelope.
    #[error("invalid style guide response: {0}")]
    Protocol(String),

    /// A local style guide file could not be read.
    #[error("failed to read style guide file {path}")]
    Io {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`FetchError`].
pub type FetchResult<T> = Result<T, FetchError>;
