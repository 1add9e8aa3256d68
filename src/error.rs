//! Error types for the reportpage library.

use std::io;
use thiserror::Error;

/// Result type alias for reportpage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or paginating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document or configuration JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document violates the content model.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Two sections or elements share an identifier.
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// A section appeared below the document's top level.
    #[error("Section '{0}' is nested inside content; sections are only allowed at the top level")]
    NestedSection(String),

    /// A heading level outside 1..=6.
    #[error("Heading '{0}' has invalid level {1} (expected 1-6)")]
    InvalidHeadingLevel(String, u8),

    /// The pagination configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error while rendering a result (JSON, summaries).
    #[error("Rendering error: {0}")]
    Render(String),
}
