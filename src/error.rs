//! Error types for pdfsense.

use std::io;
use thiserror::Error;

/// Result type alias for pdfsense operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analyzing PDF documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// A document of a collection could not be opened or parsed.
    #[error("Unreadable document {document}: {reason}")]
    UnreadableDocument {
        /// Document identifier (usually the file name)
        document: String,
        /// Underlying failure
        reason: String,
    },

    /// The embedding backend failed or returned malformed output.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The job descriptor is missing or invalid.
    #[error("Invalid job descriptor: {0}")]
    InvalidJob(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an error as an isolated per-document failure.
    pub fn unreadable(document: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::UnreadableDocument {
            document: document.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
