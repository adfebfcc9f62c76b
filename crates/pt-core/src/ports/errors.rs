use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Io(String),
}

/// Failure to fetch one catalog item. Captured per item during hydration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The service answered with `status = false`.
    #[error("{message}")]
    Rejected { message: String },

    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("network error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The service refused the order; the message is shown to the user.
    #[error("{message}")]
    Rejected { message: String },

    #[error("network error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}
