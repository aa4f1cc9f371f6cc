//! Error types for Doctext.

use thiserror::Error;

/// Core error type for Doctext operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using Doctext's Error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
