//! Errors surfaced by the proxy client

use reqwest::StatusCode;
use thiserror::Error;

/// A proxy call did not succeed
///
/// Callers only need to know that the call failed; the variants exist so
/// the failure can be logged meaningfully.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("transport error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The proxy answered with a non-success status
    #[error("{url} answered {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },

    /// The response body was not the expected JSON
    #[error("unexpected response body from {url}: {message}")]
    Decode { url: String, message: String },

    /// The client could not be constructed
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Status code of the response, when one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
