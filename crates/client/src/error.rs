//! Error types for the inkpost API client.

use thiserror::Error;

/// Errors that can occur when talking to the blog API.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (network unreachable, DNS, timeout).
    #[error("connection error: {0}")]
    Connection(String),

    /// The server answered with a non-success status.
    ///
    /// The response body is preserved verbatim: this API reports
    /// validation failures as field-keyed JSON maps, and the stores own
    /// the policy of which field to surface. A body that is not valid
    /// JSON is captured as a JSON string.
    #[error("API error (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body as returned by the server.
        body: serde_json::Value,
    },

    /// Response deserialization error.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns the HTTP status if the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server's error body if the server rejected the request.
    pub fn api_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns `true` if this is a transport-level error: the request may
    /// never have reached the server.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
