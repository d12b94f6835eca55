//! Error types for the airban library.

use std::io;
use thiserror::Error;

/// Result type alias for airban operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the airban library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing error in a source export.
    #[error("CSV parsing error: {0}")]
    Csv(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// A catalog file does not have the expected shape.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Collation data for the requested locale could not be loaded.
    #[error("Collation error: {0}")]
    Collation(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
