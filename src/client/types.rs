//! Item record and client error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record exchanged with the upstream server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

/// Errors that can occur while talking to the upstream.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configured base URL could not be turned into a request target.
    #[error("Invalid upstream URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout or transport failure.
    #[error("Request to upstream failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not an item.
    #[error("Failed to decode upstream body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
