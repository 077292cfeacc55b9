//! Data layer error types
//!
//! Errors raised while reading the dashboard documents.

use thiserror::Error;

/// Errors that can occur while reading or decoding a document
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid JSON for the expected shape
    #[error("Invalid {document} document: {message}")]
    Decode {
        document: &'static str,
        message: String,
    },
}

impl DataError {
    pub fn decode(document: &'static str, err: serde_json::Error) -> Self {
        DataError::Decode {
            document,
            message: err.to_string(),
        }
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
