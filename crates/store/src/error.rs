use thiserror::Error;

use inkpost_session::SessionError;

/// Failure of a store action, carrying the message a view should show.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected client-side before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The action failed against the server (or never reached it).
    #[error("{message}")]
    Action {
        /// Human-readable message extracted from the server's error body,
        /// or a per-action fallback.
        message: String,
        /// The underlying client error, absent when the failure was
        /// synthesized locally (e.g. a token missing from a success
        /// response).
        #[source]
        source: Option<inkpost_client::Error>,
    },

    /// Persistent session storage failed.
    #[error(transparent)]
    Storage(#[from] SessionError),

    /// A cached record could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub(crate) fn action(message: impl Into<String>, source: inkpost_client::Error) -> Self {
        Self::Action {
            message: message.into(),
            source: Some(source),
        }
    }
}
