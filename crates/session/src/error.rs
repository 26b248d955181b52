use thiserror::Error;

/// Errors surfaced by a session storage backend.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing file could not be read or written.
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not hold a valid key/value map.
    #[error("session storage is corrupt: {0}")]
    Corrupt(String),
}
