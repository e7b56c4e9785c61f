//! Error types for each failure domain.
//!
//! - [`FetchError`]: anything that can go wrong talking to the news API. These
//!   never leave the fetcher; they are logged and turned into an empty feed.
//! - [`OutputError`]: writing the saved JSON file.
//! - [`ConfigError`]: building a [`NewsConfig`](crate::config::NewsConfig) from CLI input.
//!
//! Variants that wrap a cause expose it through `source()` only; their own
//! message never repeats it. Use [`crate::utils::error_chain`] for a one-line
//! rendering with every cause.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single news-sentiment request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body-read failure.
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(StatusCode),

    /// The body was not JSON at all.
    #[error("response is not valid JSON")]
    Decode(#[source] serde_json::Error),

    /// The body was JSON but carried no `feed` key.
    #[error("unexpected API response: {0}")]
    MissingFeed(String),

    /// The body carried a lower-case `information` notice, which the API sends
    /// when a request quota is exhausted.
    #[error("API limit reached: {0}")]
    ApiLimit(String),

    /// `feed` was present but not an array of objects.
    #[error("malformed feed")]
    MalformedFeed(#[source] serde_json::Error),
}

/// Failure while persisting articles.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize articles")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("invalid endpoint URL '{url}'")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
