//! Error types for pdfmark.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::outline::NodeHandle;

/// Result type alias for pdfmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or applying bookmarks.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input file referenced by the operation does not exist.
    #[error("No such file: {}", .0.display())]
    MissingInput(PathBuf),

    /// The file is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The document is encrypted and cannot be rewritten.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error reading or writing the PDF object structure.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The last token of a bookmark line is not an integer page number.
    #[error("Invalid page number {token:?} on line {line}")]
    InvalidPageNumber {
        /// 1-based line number in the bookmark text
        line: usize,
        /// The offending token
        token: String,
    },

    /// A resolved bookmark target lies outside the document.
    #[error("Page index out of range: {index} >= {page_count}")]
    PageOutOfRange {
        /// Zero-based page index after applying the page offset
        index: i64,
        /// Total number of pages in the document
        page_count: u32,
    },

    /// A parent handle was not created by this assembler.
    #[error("Bookmark parent not found: {0}")]
    DanglingParent(NodeHandle),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageOutOfRange {
            index: 49,
            page_count: 10,
        };
        assert_eq!(err.to_string(), "Page index out of range: 49 >= 10");

        let err = Error::MissingInput(PathBuf::from("book.pdf"));
        assert_eq!(err.to_string(), "No such file: book.pdf");

        let err = Error::InvalidPageNumber {
            line: 3,
            token: "xii".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid page number \"xii\" on line 3");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
