//! Error type shared by the transport, poller and submitter.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection refused, DNS failure, body read error, ...
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a status the caller does not accept.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The response body was not a JSON array of messages.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
