//! Error types for Scrumsight.
//!
//! Only the fatal pipeline conditions live here. Recoverable problems
//! (missing sections, field fallbacks, dropped player rows) are folded into
//! `ProcessingInfo` on the report and never surface as an `Error`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The uploaded bytes could not be converted to text at all.
    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    /// None of the known section anchors were located in the text.
    #[error("No sections located in document: {0}")]
    NoSectionsLocated(String),

    /// An assembled team-level record (or the whole report) failed schema
    /// validation.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Reserved for `ReportStore` implementations that can actually fail;
    /// the in-memory store never does.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
