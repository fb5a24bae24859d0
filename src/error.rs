//! Error types for the pdf-cards library

use std::path::PathBuf;
use lopdf::ObjectId;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdf-cards library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Requested page index is past the end of the document
    #[error("Page index {index} out of bounds (document has {page_count} pages)")]
    PageOutOfBounds { index: u32, page_count: usize },

    /// Page (and its ancestors) carry no usable MediaBox
    #[error("Page {0:?} has no MediaBox")]
    MissingMediaBox(ObjectId),

    /// Rejected split options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// General error
    #[error("{0}")]
    General(String),
}
